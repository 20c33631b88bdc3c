// ==========================================
// 补货计划端到端测试
// ==========================================
// 测试目标: 验证 文件导入 → 发运分配 → 托盘换算 → 装车调度 → 导出 全流程
// 覆盖范围: CSV 导入、表头规范化、缺列报错、配置加载、结果导出
// ==========================================

mod helpers;

use helpers::test_data_builder::{ProductionBuilder, StoreDemandBuilder};
use retail_replenishment::domain::DeploymentPriority;
use retail_replenishment::exporter::{write_deployments_csv, write_shipments_csv};
use retail_replenishment::importer::UniversalFileParser;
use retail_replenishment::{
    logging, ConfigError, EngineError, ImportError, PalletConverter, PipelineError,
    PlanningConfig, RawTable, ReplenishmentPipeline,
};
use std::collections::HashMap;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

// ==========================================
// 测试辅助函数
// ==========================================

fn write_csv_file(content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn create_test_pipeline(horizon_days: u32) -> ReplenishmentPipeline {
    ReplenishmentPipeline::new(PlanningConfig {
        horizon_days,
        ..PlanningConfig::default()
    })
    .unwrap()
}

fn raw_table(rows: &[&[(&str, &str)]]) -> RawTable {
    RawTable::from_records(
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<HashMap<String, String>>()
            })
            .collect(),
    )
}

// ==========================================
// 测试用例 1: CSV 全流程
// ==========================================

#[test]
fn test_csv_end_to_end() {
    logging::init_test();
    println!("\n=== 测试：CSV 全流程 ===");

    // 表头大小写/空格不规范
    let production_file = write_csv_file(
        "Plant ID,Item ID,Day,Production Quantity,Starting Inventory Plant\n\
         P1,SKU1,1,100,0\n",
    );
    let demand_file = write_csv_file(
        " Plant_ID ,ITEM_ID,day,Store ID,Projection,Avg Daily Demand,Transit Time Days,Safety Stock Static\n\
         P1,SKU1,1,S1,5,2,3,20\n",
    );

    let parser = UniversalFileParser;
    let production = parser.parse(production_file.path()).unwrap();
    let demand = parser.parse(demand_file.path()).unwrap();

    let pipeline = create_test_pipeline(1);
    let converter = PalletConverter::new().with_pallet_size("SKU1", 1.0);
    let result = pipeline.run_tables(&production, &demand, &converter).unwrap();

    // 发运: 5 / 10 / 20 / 65
    let quantities: Vec<(DeploymentPriority, f64)> = result
        .deployments
        .iter()
        .map(|r| (r.priority, r.quantity))
        .collect();
    assert_eq!(
        quantities,
        vec![
            (DeploymentPriority::CriticalRisk, 5.0),
            (DeploymentPriority::SafetyStock, 10.0),
            (DeploymentPriority::BufferStock, 20.0),
            (DeploymentPriority::Leftover, 65.0),
        ]
    );
    assert!(result.deployments.iter().all(|r| r.arrival_day == 4));
    assert!(result.deployment_summary.is_conserved());

    // 装车: 100 托盘 → 2 车 68 托盘，leftover 发 33 结转 32
    let labels: Vec<&str> = result.shipments.iter().map(|r| r.priority.as_str()).collect();
    assert_eq!(
        labels,
        vec!["buffer_stock", "critical_risk", "leftover", "safety_stock"]
    );
    let leftover = result
        .shipments
        .iter()
        .find(|r| r.priority == "leftover")
        .unwrap();
    assert_eq!(leftover.pallets_available, 65.0);
    assert_eq!(leftover.pallets_sent, 33.0);
    assert_eq!(leftover.pallets_carryover, 32.0);
    assert!(result.shipments.iter().all(|r| r.trucks_sent == 2));

    assert_eq!(result.shipment_summary.total_trucks, 2);
    assert_eq!(result.shipment_summary.pallets_sent, 68.0);
    assert_eq!(result.shipment_summary.total_final_carryover(), 32.0);

    println!("✓ 发运 {} 条, 装车 {} 条", result.deployments.len(), result.shipments.len());
}

#[test]
fn test_pipeline_result_serializes() {
    let production = vec![ProductionBuilder::new("P1", "SKU1", 1).quantity(40.0).build()];
    let demand = vec![StoreDemandBuilder::new("P1", "SKU1", 1, "S1")
        .demand(4.0)
        .transit(1)
        .safety_stock(8.0)
        .build()];
    let converter = PalletConverter::from_sizes(vec![("SKU1", 2.0)]);

    let result = create_test_pipeline(3).run(&production, &demand, &converter).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert!(json.get("run_id").is_some());
    assert_eq!(json["config"]["horizon_days"], 3);
    assert_eq!(json["config"]["truck_capacity"], 34.0);
    assert_eq!(json["deployments"][0]["priority"], "critical_risk");
    assert_eq!(json["shipment_summary"]["total_trucks"], 0);
}

// ==========================================
// 测试用例 2: 缺列与数据错误
// ==========================================

#[test]
fn test_schedule_table_missing_pallet_size() {
    println!("\n=== 测试：装车输入缺少 pallet_size ===");
    let table = raw_table(&[&[
        ("day", "1"),
        ("plant_id", "P1"),
        ("store_id", "S1"),
        ("item_id", "SKU1"),
        ("priority", "leftover"),
        ("store_pallet_total", "40"),
    ]]);

    let err = create_test_pipeline(45).schedule_table(&table).unwrap_err();
    match &err {
        PipelineError::Import(import_err) => {
            assert_eq!(import_err.missing_columns(), ["pallet_size".to_string()]);
        }
        other => panic!("期望 Import 错误, 实际 {:?}", other),
    }
    assert!(err.to_string().contains("pallet_size"));
    println!("✓ 错误信息: {}", err);
}

#[test]
fn test_schedule_table_runs_scheduler() {
    let table = raw_table(&[
        &[
            ("Day", "1"),
            ("Plant ID", "P1"),
            ("Store ID", "S1"),
            ("Item ID", "SKU1"),
            ("Priority", "express"),
            ("Pallet Size", "12"),
            ("Store Pallet Total", "30"),
        ],
        &[
            ("Day", "1"),
            ("Plant ID", "P1"),
            ("Store ID", "S1"),
            ("Item ID", "SKU2"),
            ("Priority", "critical_risk"),
            ("Pallet Size", "12"),
            ("Store Pallet Total", "10"),
        ],
    ]);

    let records = create_test_pipeline(45).schedule_table(&table).unwrap();
    assert_eq!(records.len(), 2);

    // 未知优先级最后发: critical 10 全发，express 发 24 结转 6
    let express = records.iter().find(|r| r.priority == "express").unwrap();
    let critical = records.iter().find(|r| r.priority == "critical_risk").unwrap();
    assert_eq!(critical.pallets_sent, 10.0);
    assert_eq!(express.pallets_sent, 24.0);
    assert_eq!(express.pallets_carryover, 6.0);
    assert_eq!(express.qty_carryover, 72.0);
}

#[test]
fn test_run_tables_reports_all_missing_demand_columns() {
    let production = raw_table(&[&[
        ("plant_id", "P1"),
        ("item_id", "SKU1"),
        ("day", "1"),
        ("production_quantity", "10"),
        ("starting_inventory_plant", "0"),
    ]]);
    let demand = raw_table(&[&[
        ("plant_id", "P1"),
        ("item_id", "SKU1"),
        ("day", "1"),
        ("store_id", "S1"),
        ("projection", "0"),
        ("transit_time_days", "1"),
    ]]);

    let err = create_test_pipeline(1)
        .run_tables(&production, &demand, &PalletConverter::new())
        .unwrap_err();
    match err {
        PipelineError::Import(ImportError::MissingColumns { table, missing }) => {
            assert_eq!(table, "store_demand");
            assert_eq!(missing, vec!["avg_daily_demand", "safety_stock_static"]);
        }
        other => panic!("期望 MissingColumns, 实际 {:?}", other),
    }
}

#[test]
fn test_missing_pallet_size_for_deployed_item() {
    let production = vec![ProductionBuilder::new("P1", "SKU9", 1).quantity(5.0).build()];
    let demand = vec![StoreDemandBuilder::new("P1", "SKU9", 1, "S1").demand(1.0).build()];

    let err = create_test_pipeline(1)
        .run(&production, &demand, &PalletConverter::new())
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Engine(EngineError::MissingPalletSize(ref item)) if item == "SKU9"
    ));
}

// ==========================================
// 测试用例 3: 配置
// ==========================================

#[test]
fn test_pipeline_from_config_file() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(br#"{ "horizon_days": 2, "truck_capacity": 10 }"#)
        .unwrap();

    let config = PlanningConfig::load_from_file(file.path()).unwrap();
    let pipeline = ReplenishmentPipeline::new(config).unwrap();
    assert_eq!(pipeline.config().horizon_days, 2);
    assert_eq!(pipeline.config().truck_capacity, 10.0);

    // 第 3 天超出计划期，不参与分配
    let production = vec![
        ProductionBuilder::new("P1", "SKU1", 2).quantity(20.0).build(),
        ProductionBuilder::new("P1", "SKU1", 3).quantity(20.0).build(),
    ];
    let demand = vec![
        StoreDemandBuilder::new("P1", "SKU1", 2, "S1").demand(1.0).build(),
        StoreDemandBuilder::new("P1", "SKU1", 3, "S1").demand(1.0).build(),
    ];
    let converter = PalletConverter::new().with_pallet_size("SKU1", 1.0);
    let result = pipeline.run(&production, &demand, &converter).unwrap();

    assert!(result.deployments.iter().all(|r| r.day == 2));
    assert_eq!(result.deployment_summary.total_deployed, 20.0);
    assert_eq!(result.shipment_summary.total_trucks, 2);
}

#[test]
fn test_invalid_config_rejected() {
    let err = ReplenishmentPipeline::new(PlanningConfig {
        horizon_days: 45,
        truck_capacity: -1.0,
    })
    .err()
    .unwrap();
    assert!(matches!(
        err,
        PipelineError::Config(ConfigError::InvalidValue { ref key, .. }) if key == "truck_capacity"
    ));
}

// ==========================================
// 测试用例 4: 结果导出
// ==========================================

#[test]
fn test_export_round_trip_headers() {
    let production = vec![ProductionBuilder::new("P1", "SKU1", 1).quantity(70.0).build()];
    let demand = vec![
        StoreDemandBuilder::new("P1", "SKU1", 1, "S1").demand(1.0).build(),
        StoreDemandBuilder::new("P1", "SKU1", 1, "S2").demand(1.0).build(),
    ];
    let converter = PalletConverter::new().with_pallet_size("SKU1", 1.0);
    let result = create_test_pipeline(1).run(&production, &demand, &converter).unwrap();

    let mut deployments = Vec::new();
    write_deployments_csv(&mut deployments, &result.deployments).unwrap();
    let deployments = String::from_utf8(deployments).unwrap();
    let mut lines = deployments.lines();
    assert_eq!(
        lines.next(),
        Some("day,plant_id,item_id,store_id,quantity,arrival_day,priority")
    );
    assert_eq!(lines.count(), result.deployments.len());

    let mut shipments = Vec::new();
    write_shipments_csv(&mut shipments, &result.shipments).unwrap();
    let shipments = String::from_utf8(shipments).unwrap();
    assert_eq!(
        shipments.lines().next(),
        Some(
            "day,plant_id,store_id,item_id,priority,pallet_size,pallets_available,\
             pallets_sent,pallets_carryover,qty_available,qty_sent,qty_carryover,trucks_sent"
        )
    );
    assert_eq!(shipments.lines().count(), result.shipments.len() + 1);
}
