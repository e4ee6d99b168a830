use super::*;
use shared::models::ChannelCreate;

fn volume(code: &str, fee_rate: f64, count: i64) -> ChannelVolume {
    ChannelVolume {
        code: code.to_string(),
        name: code.to_string(),
        fee_rate,
        count,
    }
}

fn flow_amount(settlement: &Settlement, id: FlowId) -> f64 {
    settlement.flow(id).unwrap().amount
}

// ==================== Reference Scenarios ====================

#[test]
fn test_scenario_naver_with_offline() {
    // One channel "NAVER" fee 10%, 100 online visitors, 50 offline:
    // ticket sales = 100 * 3000 * 0.9 + 50 * 3000 = 270000 + 150000 = 420000
    let settlement = compute_settlement(&[volume("NAVER", 10.0, 100)], 50).unwrap();

    assert_eq!(flow_amount(&settlement, FlowId::TicketSales), 420_000.0);

    // Park fee and marketing fee scale the same way: 100*1000*0.9 + 50*1000
    assert_eq!(flow_amount(&settlement, FlowId::ParkFee), 140_000.0);
    assert_eq!(flow_amount(&settlement, FlowId::MarketingFee), 140_000.0);
    // Operations share: 100*500*0.9 + 50*500
    assert_eq!(flow_amount(&settlement, FlowId::OperationsShare), 70_000.0);
    // Agency: (420000 - 140000 - 140000 + 70000) * 20% = 210000 * 0.2
    assert_eq!(flow_amount(&settlement, FlowId::AgencyCommission), 42_000.0);
}

#[test]
fn test_scenario_single_fee_free_visitor() {
    // Fee 0, count 1: agency commission = (3000 - 1000 - 1000 + 500) * 20% = 300
    let settlement = compute_settlement(&[volume("DIRECT", 0.0, 1)], 0).unwrap();
    assert_eq!(flow_amount(&settlement, FlowId::AgencyCommission), 300.0);
}

#[test]
fn test_company_books_fee_free() {
    // 10 fee-free visitors, per-company books:
    //   TKT: revenue 30000, cost 10000+10000+3000, profit 30000-23000+5000
    //   MAZE: revenue 10000 (park fee), cost 5000 (ops share), profit 5000
    //   MKT: revenue 10000, no cost
    //   AGC: revenue 3000, no cost
    let settlement = compute_settlement(&[volume("DIRECT", 0.0, 10)], 0).unwrap();

    let tkt = settlement.company(CompanyCode::Tkt).unwrap();
    assert_eq!(tkt.revenue, 30_000.0);
    assert_eq!(tkt.cost, 23_000.0);
    assert_eq!(tkt.profit, 12_000.0);
    assert_eq!(tkt.profit_rate, 40.0);

    let maze = settlement.company(CompanyCode::Maze).unwrap();
    assert_eq!(maze.revenue, 10_000.0);
    assert_eq!(maze.cost, 5_000.0);
    assert_eq!(maze.profit, 5_000.0);
    assert_eq!(maze.profit_rate, 50.0);

    let mkt = settlement.company(CompanyCode::Mkt).unwrap();
    assert_eq!(mkt.revenue, 10_000.0);
    assert_eq!(mkt.cost, 0.0);
    assert_eq!(mkt.profit, 10_000.0);
    assert_eq!(mkt.profit_rate, 100.0);

    let agc = settlement.company(CompanyCode::Agc).unwrap();
    assert_eq!(agc.revenue, 3_000.0);
    assert_eq!(agc.profit, 3_000.0);
}

// ==================== Invariants ====================

#[test]
fn test_money_balance_per_flow() {
    // Every internal flow's amount shows up once as the source's credit and
    // once as the counterparty's cost, never asymmetrically
    let settlement =
        compute_settlement(&[volume("NAVER", 10.0, 73), volume("KAKAO", 7.5, 19)], 41).unwrap();

    for company in &settlement.companies {
        let expected_cost: f64 = settlement
            .flows
            .iter()
            .filter(|f| f.counterparty == Some(company.code))
            .map(|f| f.amount)
            .sum();
        assert_eq!(company.cost, expected_cost);
    }
}

#[test]
fn test_profit_conservation() {
    // Internal flows cancel out: the sum of all four profits equals the
    // external inflow (ticket sales), even after per-flow rounding
    let settlement =
        compute_settlement(&[volume("NAVER", 10.0, 123), volume("KLOOK", 12.5, 77)], 55).unwrap();

    let profit_sum: f64 = settlement.companies.iter().map(|c| c.profit).sum();
    assert_eq!(profit_sum, flow_amount(&settlement, FlowId::TicketSales));
}

#[test]
fn test_no_negative_flows() {
    let settlement = compute_settlement(&[volume("FULLFEE", 100.0, 10)], 0).unwrap();
    for flow in &settlement.flows {
        assert!(flow.amount >= 0.0, "flow {} is negative", flow.id);
    }
}

#[test]
fn test_idempotent() {
    let volumes = vec![volume("NAVER", 10.0, 100), volume("KAKAO", 7.5, 33)];
    let a = compute_settlement(&volumes, 20).unwrap();
    let b = compute_settlement(&volumes, 20).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_full_precision_before_rounding() {
    // 3 visitors at fee 33.3%: per-visitor ticket amount is 2001 exactly in
    // Decimal; accumulating before rounding must not drift
    let settlement = compute_settlement(&[volume("X", 33.3, 3)], 0).unwrap();
    assert_eq!(flow_amount(&settlement, FlowId::TicketSales), 6_003.0);
}

#[test]
fn test_rounding_happens_once_per_flow() {
    // fee 33.33% -> per-visitor ticket amount 2000.1; 7 visitors = 14000.7,
    // rounded once to 14001 (per-visitor rounding would give 7 * 2000 = 14000)
    let settlement = compute_settlement(&[volume("X", 33.33, 7)], 0).unwrap();
    assert_eq!(flow_amount(&settlement, FlowId::TicketSales), 14_001.0);
}

// ==================== Edge Cases ====================

#[test]
fn test_empty_input() {
    let settlement = compute_settlement(&[], 0).unwrap();
    for flow in &settlement.flows {
        assert_eq!(flow.amount, 0.0);
    }
    for company in &settlement.companies {
        assert_eq!(company.revenue, 0.0);
        assert_eq!(company.profit, 0.0);
        // profit rate must be 0, not NaN, when revenue is 0
        assert_eq!(company.profit_rate, 0.0);
    }
}

#[test]
fn test_zero_count_channel_contributes_nothing() {
    let with_zero = compute_settlement(&[volume("NAVER", 10.0, 100), volume("DEAD", 50.0, 0)], 0)
        .unwrap();
    let without = compute_settlement(&[volume("NAVER", 10.0, 100)], 0).unwrap();
    assert_eq!(with_zero, without);
}

#[test]
fn test_negative_count_rejected() {
    let err = compute_settlement(&[volume("NAVER", 10.0, -1)], 0).unwrap_err();
    assert_eq!(err.code, shared::ErrorCode::NegativeCount);

    let err = compute_settlement(&[], -5).unwrap_err();
    assert_eq!(err.code, shared::ErrorCode::NegativeCount);
}

#[test]
fn test_invalid_rate_rejected() {
    let err = compute_settlement(&[volume("BAD", 101.0, 1)], 0).unwrap_err();
    assert_eq!(err.code, shared::ErrorCode::InvalidRate);
}

#[test]
fn test_hundred_percent_fee_channel() {
    // A 100% fee channel moves no money but offline still contributes
    let settlement = compute_settlement(&[volume("FREEBIE", 100.0, 40)], 10).unwrap();
    assert_eq!(flow_amount(&settlement, FlowId::TicketSales), 30_000.0);
    assert_eq!(flow_amount(&settlement, FlowId::AgencyCommission), 3_000.0);
}

// ==================== Volume Resolution ====================

#[test]
fn test_resolve_known_and_unknown_channels() {
    let mut master = MasterData::new();
    master
        .create_channel(ChannelCreate {
            code: "NAVER".to_string(),
            name: "Naver Booking".to_string(),
            fee_rate: 10.0,
            sort_order: None,
        })
        .unwrap();

    let mut counts = BTreeMap::new();
    counts.insert("NAVER".to_string(), 100_i64);
    counts.insert("RETIRED".to_string(), 5_i64);

    let volumes = resolve_volumes(&counts, &master);
    assert_eq!(volumes.len(), 2);

    let naver = volumes.iter().find(|v| v.code == "NAVER").unwrap();
    assert_eq!(naver.name, "Naver Booking");
    assert_eq!(naver.fee_rate, 10.0);

    // Unknown code degrades to a zero-commission, self-named volume
    let retired = volumes.iter().find(|v| v.code == "RETIRED").unwrap();
    assert_eq!(retired.name, "RETIRED");
    assert_eq!(retired.fee_rate, 0.0);
}

#[test]
fn test_settle_monthly_record_uses_rate_snapshots() {
    use shared::models::{ChannelSales, MonthlyRecord, MonthlySummary};

    let mut channel_sales = BTreeMap::new();
    channel_sales.insert(
        "NAVER".to_string(),
        ChannelSales {
            name: "Naver Booking".to_string(),
            count: 100,
            fee_rate: 10.0,
        },
    );

    let record = MonthlyRecord {
        year: 2024,
        month: 7,
        days: vec![],
        summary: MonthlySummary {
            online_count: 100,
            offline_count: 50,
            total_count: 150,
        },
        channel_sales,
        category_sales: BTreeMap::new(),
        settlement: empty_settlement(),
    };

    let settlement = settle_monthly_record(&record).unwrap();
    assert_eq!(flow_amount(&settlement, FlowId::TicketSales), 420_000.0);
}
