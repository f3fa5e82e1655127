use crate::domain::entities::report::{AttainmentRow, DealDetail, DealStatus, Product, RagStatus};

pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        numerator / denominator
    }
}

/// A zero target counts as met.
fn attainment_pct(acv: f64, target: f64) -> f64 {
    if target > 0.0 {
        (safe_div(acv, target) * 100.0).round()
    } else {
        100.0
    }
}

/// Pipeline over what is still left to close, one decimal; nothing left is 0.
fn coverage_x(pipeline: f64, remaining: f64) -> f64 {
    if remaining > 0.0 {
        (safe_div(pipeline, remaining) * 10.0).round() / 10.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductTotal {
    pub fy_target: f64,
    pub q1_target: f64,
    pub qtd_target: f64,
    pub qtd_acv: f64,
    pub qtd_attainment_pct: f64,
    pub pipeline_acv: f64,
    pub pipeline_coverage_x: f64,
    pub lost_deals: f64,
    pub lost_acv: f64,
}

impl ProductTotal {
    pub fn from_rows(rows: &[AttainmentRow]) -> Self {
        let mut total = ProductTotal::default();
        for row in rows {
            total.fy_target += row.fy_target.unwrap_or(0.0);
            total.q1_target += row.q1_target;
            total.qtd_target += row.qtd_target;
            total.qtd_acv += row.qtd_acv;
            total.pipeline_acv += row.pipeline_acv;
            total.lost_deals += row.qtd_lost_deals;
            total.lost_acv += row.qtd_lost_acv;
        }
        total.qtd_attainment_pct = attainment_pct(total.qtd_acv, total.qtd_target);
        total.pipeline_coverage_x =
            coverage_x(total.pipeline_acv, total.q1_target - total.qtd_acv);
        total
    }
}

/// One total per product, in product order, over whichever rows survived
/// filtering.
pub fn product_totals(rows: &[AttainmentRow]) -> Vec<(Product, ProductTotal)> {
    Product::ALL
        .iter()
        .map(|product| {
            let product_rows: Vec<AttainmentRow> = rows
                .iter()
                .filter(|row| row.product == *product)
                .cloned()
                .collect();
            (*product, ProductTotal::from_rows(&product_rows))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrandTotal {
    pub fy_target: f64,
    pub q1_target: f64,
    pub qtd_target: f64,
    pub qtd_acv: f64,
    pub qtd_attainment_pct: f64,
    pub pipeline_acv: f64,
    pub pipeline_coverage_x: f64,
}

impl GrandTotal {
    pub fn combine(totals: &[ProductTotal]) -> Self {
        let mut grand = GrandTotal::default();
        for total in totals {
            grand.fy_target += total.fy_target;
            grand.q1_target += total.q1_target;
            grand.qtd_target += total.qtd_target;
            grand.qtd_acv += total.qtd_acv;
            grand.pipeline_acv += total.pipeline_acv;
        }
        grand.qtd_attainment_pct = attainment_pct(grand.qtd_acv, grand.qtd_target);
        grand.pipeline_coverage_x =
            coverage_x(grand.pipeline_acv, grand.q1_target - grand.qtd_acv);
        grand
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutiveCounts {
    pub areas_exceeding_target: usize,
    pub areas_at_risk: usize,
    pub areas_needing_attention: usize,
}

impl ExecutiveCounts {
    pub fn from_rows(rows: &[AttainmentRow]) -> Self {
        Self {
            areas_exceeding_target: rows
                .iter()
                .filter(|row| row.qtd_attainment_pct >= 100.0)
                .count(),
            areas_at_risk: rows
                .iter()
                .filter(|row| row.rag_status == RagStatus::Red)
                .count(),
            areas_needing_attention: rows
                .iter()
                .filter(|row| row.rag_status == RagStatus::Yellow)
                .count(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DealStats {
    pub won: usize,
    pub lost: usize,
    pub open: usize,
    pub won_acv: f64,
    pub open_acv: f64,
    pub win_rate_pct: f64,
}

impl DealStats {
    pub fn from_deals(deals: &[DealDetail]) -> Self {
        let mut stats = DealStats::default();
        for deal in deals {
            match deal.status() {
                DealStatus::Won => {
                    stats.won += 1;
                    stats.won_acv += deal.acv;
                }
                DealStatus::Lost => stats.lost += 1,
                DealStatus::Open => {
                    stats.open += 1;
                    stats.open_acv += deal.acv;
                }
            }
        }
        let closed = (stats.won + stats.lost) as f64;
        stats.win_rate_pct = (safe_div(stats.won as f64, closed) * 100.0).round();
        stats
    }
}
