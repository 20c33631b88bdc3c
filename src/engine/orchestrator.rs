// ==========================================
// 零售补货计划系统 - 引擎编排器
// ==========================================
// 用途: 串联 发运分配 → 托盘换算 → 装车调度
// ==========================================

use crate::config::{ConfigError, PlanningConfig};
use crate::domain::demand::StoreDemandRow;
use crate::domain::deployment::DeploymentRecord;
use crate::domain::production::ProductionScheduleRow;
use crate::domain::shipment::ShipmentRecord;
use crate::engine::deployment::{DemandDeploymentEngine, DeploymentSummary};
use crate::engine::error::EngineError;
use crate::engine::pallet_converter::PalletConverter;
use crate::engine::truck_loader::{ShipmentSummary, TruckLoadScheduler};
use crate::importer::error::ImportError;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::RawTable;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 编排器错误（汇总各层错误）
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

// ==========================================
// PipelineResult - 运行结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub config: PlanningConfig,

    // 发运分配输出
    pub deployments: Vec<DeploymentRecord>,
    pub deployment_summary: DeploymentSummary,

    // 装车调度输出
    pub shipments: Vec<ShipmentRecord>,
    pub shipment_summary: ShipmentSummary,
}

// ==========================================
// ReplenishmentPipeline - 引擎编排器
// ==========================================
pub struct ReplenishmentPipeline {
    config: PlanningConfig,
    deployment: DemandDeploymentEngine,
    scheduler: TruckLoadScheduler,
}

impl ReplenishmentPipeline {
    /// 创建编排器（校验配置）
    pub fn new(config: PlanningConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let scheduler = TruckLoadScheduler::new(config.truck_capacity)?;
        Ok(Self {
            config,
            deployment: DemandDeploymentEngine::new(),
            scheduler,
        })
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// 执行完整流程
    ///
    /// # 参数
    /// - production: 生产排程
    /// - demand: 门店需求
    /// - converter: 品项托盘规格
    pub fn run(
        &self,
        production: &[ProductionScheduleRow],
        demand: &[StoreDemandRow],
        converter: &PalletConverter,
    ) -> Result<PipelineResult, PipelineError> {
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            production_rows = production.len(),
            demand_rows = demand.len(),
            horizon_days = self.config.horizon_days,
            truck_capacity = self.config.truck_capacity,
            "开始执行补货计划"
        );

        // ==========================================
        // 步骤1: 发运分配
        // ==========================================
        debug!("步骤1: 执行需求发运分配");
        let outcome = self
            .deployment
            .deploy(production, demand, self.config.horizon_days);
        if !outcome.summary.is_conserved() {
            warn!(
                total_available = outcome.summary.total_available,
                total_deployed = outcome.summary.total_deployed,
                dropped_quantity = outcome.summary.dropped_quantity,
                "发运数量未守恒"
            );
        }

        // ==========================================
        // 步骤2: 托盘换算
        // ==========================================
        debug!("步骤2: 件数换算托盘");
        let shipment_rows = converter.to_shipment_rows(&outcome.records)?;

        // ==========================================
        // 步骤3: 装车调度
        // ==========================================
        debug!("步骤3: 执行装车调度");
        let shipments = self.scheduler.schedule(&shipment_rows);
        let shipment_summary = ShipmentSummary::from_records(&shipments);

        info!(
            %run_id,
            deployments = outcome.records.len(),
            shipments = shipments.len(),
            total_trucks = shipment_summary.total_trucks,
            final_carryover_pallets = shipment_summary.total_final_carryover(),
            "补货计划完成"
        );

        Ok(PipelineResult {
            run_id,
            generated_at: Utc::now(),
            config: self.config.clone(),
            deployments: outcome.records,
            deployment_summary: outcome.summary,
            shipments,
            shipment_summary,
        })
    }

    /// 由原始表执行完整流程（先校验表结构）
    pub fn run_tables(
        &self,
        production: &RawTable,
        demand: &RawTable,
        converter: &PalletConverter,
    ) -> Result<PipelineResult, PipelineError> {
        let mapper = FieldMapper;
        let production = mapper.map_production(production)?;
        let demand = mapper.map_store_demand(demand)?;
        self.run(&production, &demand, converter)
    }

    /// 仅执行装车调度（原始表输入，缺列立即报错）
    pub fn schedule_table(&self, shipments: &RawTable) -> Result<Vec<ShipmentRecord>, PipelineError> {
        let rows = FieldMapper.map_shipments(shipments)?;
        Ok(self.scheduler.schedule(&rows))
    }
}
