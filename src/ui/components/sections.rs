use dioxus::prelude::*;

use crate::domain::entities::report::{
    AttainmentRow, Category, DealDetail, DealStatus, LossReasonRow, PipelineHealth,
    PipelineRcaRow, Product, RagStatus, Region, Severity, Source, SourceAttainmentRow,
};
use crate::domain::entities::totals::{product_totals, DealStats, ExecutiveCounts, GrandTotal};
use crate::engine::ViewController;
use crate::ui::components::controls::{Stat, StatsBar};
use crate::ui::components::table::{filter_bar, header_row, pager, Column, Dimension};
use crate::ui::format::{
    format_coverage, format_currency, format_number, format_percent, gap_color, pct_color,
    rag_color, NEUTRAL,
};
use crate::ui::style::{colored_cell_style, table_cell_style, table_container_style, table_style};

const PRODUCT: Dimension = Dimension {
    key: "product",
    label: "Product",
    values: Product::LABELS,
};
const REGION: Dimension = Dimension {
    key: "region",
    label: "Region",
    values: Region::LABELS,
};
const CATEGORY: Dimension = Dimension {
    key: "category",
    label: "Category",
    values: Category::LABELS,
};
const RAG: Dimension = Dimension {
    key: "rag_status",
    label: "RAG",
    values: RagStatus::LABELS,
};

const ATTAINMENT_DIMENSIONS: &[Dimension] = &[PRODUCT, REGION, CATEGORY, RAG];
const ATTAINMENT_COLUMNS: &[Column] = &[
    Column::text("product", "Product"),
    Column::text("region", "Region"),
    Column::text("category", "Category"),
    Column::number("q1_target", "Q1 Target"),
    Column::number("qtd_target", "QTD Target"),
    Column::number("qtd_acv", "QTD ACV"),
    Column::number("qtd_attainment_pct", "Attainment"),
    Column::number("qtd_gap", "Gap"),
    Column::number("pipeline_acv", "Pipeline"),
    Column::number("pipeline_coverage_x", "Coverage"),
    Column::number("win_rate_pct", "Win Rate"),
    Column::number("qtd_lost_deals", "Lost Deals"),
    Column::number("qtd_lost_acv", "Lost ACV"),
    Column::text("rag_status", "RAG"),
];

const SOURCE_DIMENSIONS: &[Dimension] = &[
    REGION,
    Dimension {
        key: "source",
        label: "Source",
        values: Source::LABELS,
    },
    RAG,
];
const SOURCE_COLUMNS: &[Column] = &[
    Column::text("region", "Region"),
    Column::text("source", "Source"),
    Column::number("q1_target", "Q1 Target"),
    Column::number("qtd_target", "QTD Target"),
    Column::number("qtd_acv", "QTD ACV"),
    Column::number("attainment_pct", "Attainment"),
    Column::number("gap", "Gap"),
    Column::text("rag_status", "RAG"),
];

const PIPELINE_DIMENSIONS: &[Dimension] = &[
    PRODUCT,
    REGION,
    CATEGORY,
    Dimension {
        key: "pipeline_health",
        label: "Health",
        values: PipelineHealth::LABELS,
    },
];
const PIPELINE_COLUMNS: &[Column] = &[
    Column::text("region", "Region"),
    Column::text("product", "Product"),
    Column::text("category", "Category"),
    Column::number("pipeline_acv", "Pipeline"),
    Column::number("pipeline_coverage_x", "Coverage"),
    Column::number("pipeline_avg_age_days", "Avg Age (days)"),
    Column::text("pipeline_health", "Health"),
    Column::text("rca_commentary", "Commentary"),
    Column::text("recommended_action", "Recommended Action"),
];

const LOSS_DIMENSIONS: &[Dimension] = &[
    PRODUCT,
    REGION,
    Dimension {
        key: "severity",
        label: "Severity",
        values: Severity::LABELS,
    },
];
const LOSS_COLUMNS: &[Column] = &[
    Column::text("product", "Product"),
    Column::text("region", "Region"),
    Column::text("loss_reason", "Loss Reason"),
    Column::number("deal_count", "Deals"),
    Column::number("lost_acv", "Lost ACV"),
    Column::text("severity", "Severity"),
];

const DEAL_DIMENSIONS: &[Dimension] = &[
    Dimension {
        key: "status",
        label: "Status",
        values: DealStatus::LABELS,
    },
    PRODUCT,
    REGION,
    CATEGORY,
];
const DEAL_COLUMNS: &[Column] = &[
    Column::text("account_name", "Account"),
    Column::text("opportunity_name", "Opportunity"),
    Column::text("product", "Product"),
    Column::text("region", "Region"),
    Column::text("category", "Category"),
    Column::number("acv", "ACV"),
    Column::text("close_date", "Close Date"),
    Column::text("stage", "Stage"),
    Column::text("status", "Status"),
    Column::text("source", "Source"),
    Column::text("owner_name", "Owner"),
    Column::text("loss_reason", "Loss Reason"),
];

fn severity_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => rag_color("RED"),
        Severity::Medium => rag_color("YELLOW"),
        Severity::Low => rag_color("GREEN"),
        Severity::Other(_) => NEUTRAL,
    }
}

fn health_color(health: Option<&PipelineHealth>) -> &'static str {
    match health {
        Some(PipelineHealth::Healthy) => rag_color("GREEN"),
        Some(PipelineHealth::Adequate) => rag_color("YELLOW"),
        Some(PipelineHealth::AtRisk) => rag_color("RED"),
        Some(PipelineHealth::Other(_)) | None => NEUTRAL,
    }
}

/// Totals over the rows that currently pass the filters.
pub fn attainment_stats(rows: &[AttainmentRow]) -> Vec<Stat> {
    let totals = product_totals(rows);
    let grand = GrandTotal::combine(
        &totals
            .iter()
            .map(|(_, total)| *total)
            .collect::<Vec<_>>(),
    );
    let counts = ExecutiveCounts::from_rows(rows);

    let mut stats = vec![
        Stat::new("QTD ACV", format_currency(grand.qtd_acv)),
        Stat::new("QTD Target", format_currency(grand.qtd_target)),
        Stat::new("Attainment", format_percent(grand.qtd_attainment_pct))
            .colored(pct_color(grand.qtd_attainment_pct)),
        Stat::new("Coverage", format_coverage(grand.pipeline_coverage_x)),
    ];
    for (product, total) in totals {
        stats.push(
            Stat::new(
                format!("{product} Attainment"),
                format_percent(total.qtd_attainment_pct),
            )
            .colored(pct_color(total.qtd_attainment_pct)),
        );
    }
    stats.push(Stat::new(
        "Exceeding Target",
        counts.areas_exceeding_target.to_string(),
    ));
    stats.push(Stat::new("At Risk", counts.areas_at_risk.to_string()).colored(rag_color("RED")));
    stats.push(
        Stat::new("Needs Attention", counts.areas_needing_attention.to_string())
            .colored(rag_color("YELLOW")),
    );
    stats
}

pub fn deal_stats(deals: &[DealDetail]) -> Vec<Stat> {
    let stats = DealStats::from_deals(deals);
    vec![
        Stat::new("Won", format!("{} ({})", stats.won, format_currency(stats.won_acv))),
        Stat::new("Lost", stats.lost.to_string()),
        Stat::new("Open", format!("{} ({})", stats.open, format_currency(stats.open_acv))),
        Stat::new("Win Rate", format_percent(stats.win_rate_pct))
            .colored(pct_color(stats.win_rate_pct)),
    ]
}

#[component]
pub fn AttainmentSection(view: Signal<ViewController<AttainmentRow>>) -> Element {
    let rendered = view.read().render();
    let stats = attainment_stats(&view.read().filtered_rows());

    rsx! {
        {filter_bar(view, ATTAINMENT_DIMENSIONS, None)}
        StatsBar { stats }
        div {
            style: table_container_style(),
            table {
                style: table_style(),
                thead { {header_row(view, ATTAINMENT_COLUMNS)} }
                tbody {
                    for (idx, row) in rendered.rows.iter().enumerate() {
                        tr {
                            key: "{idx}",
                            td { style: table_cell_style(false), "{row.product}" }
                            td { style: table_cell_style(false), "{row.region}" }
                            td { style: table_cell_style(false), "{row.category}" }
                            td { style: table_cell_style(true), {format_currency(row.q1_target)} }
                            td { style: table_cell_style(true), {format_currency(row.qtd_target)} }
                            td { style: table_cell_style(true), {format_currency(row.qtd_acv)} }
                            td {
                                style: colored_cell_style(true, pct_color(row.qtd_attainment_pct)),
                                {format_percent(row.qtd_attainment_pct)}
                            }
                            td {
                                style: colored_cell_style(true, gap_color(row.qtd_gap)),
                                {format_currency(row.qtd_gap)}
                            }
                            td { style: table_cell_style(true), {format_currency(row.pipeline_acv)} }
                            td { style: table_cell_style(true), {format_coverage(row.pipeline_coverage_x)} }
                            td { style: table_cell_style(true), {format_percent(row.win_rate_pct)} }
                            td { style: table_cell_style(true), {format_number(row.qtd_lost_deals)} }
                            td { style: table_cell_style(true), {format_currency(row.qtd_lost_acv)} }
                            td {
                                style: colored_cell_style(false, rag_color(row.rag_status.as_str())),
                                "{row.rag_status}"
                            }
                        }
                    }
                }
            }
        }
        {pager(view, &rendered)}
    }
}

#[component]
pub fn SourceSection(view: Signal<ViewController<SourceAttainmentRow>>) -> Element {
    let rendered = view.read().render();

    rsx! {
        {filter_bar(view, SOURCE_DIMENSIONS, None)}
        div {
            style: table_container_style(),
            table {
                style: table_style(),
                thead { {header_row(view, SOURCE_COLUMNS)} }
                tbody {
                    for (idx, row) in rendered.rows.iter().enumerate() {
                        tr {
                            key: "{idx}",
                            td { style: table_cell_style(false), "{row.region}" }
                            td { style: table_cell_style(false), "{row.source}" }
                            td { style: table_cell_style(true), {format_currency(row.q1_target)} }
                            td { style: table_cell_style(true), {format_currency(row.qtd_target)} }
                            td { style: table_cell_style(true), {format_currency(row.qtd_acv)} }
                            td {
                                style: colored_cell_style(true, pct_color(row.attainment_pct)),
                                {format_percent(row.attainment_pct)}
                            }
                            td {
                                style: colored_cell_style(true, gap_color(row.gap)),
                                {format_currency(row.gap)}
                            }
                            td {
                                style: colored_cell_style(false, rag_color(row.rag_status.as_str())),
                                "{row.rag_status}"
                            }
                        }
                    }
                }
            }
        }
        {pager(view, &rendered)}
    }
}

#[component]
pub fn PipelineSection(view: Signal<ViewController<PipelineRcaRow>>) -> Element {
    let rendered = view.read().render();

    rsx! {
        {filter_bar(view, PIPELINE_DIMENSIONS, Some("Search commentary"))}
        div {
            style: table_container_style(),
            table {
                style: table_style(),
                thead { {header_row(view, PIPELINE_COLUMNS)} }
                tbody {
                    for (idx, row) in rendered.rows.iter().enumerate() {
                        tr {
                            key: "{idx}",
                            td { style: table_cell_style(false), "{row.region}" }
                            td { style: table_cell_style(false), "{row.product}" }
                            td { style: table_cell_style(false), "{row.category}" }
                            td { style: table_cell_style(true), {format_currency(row.pipeline_acv)} }
                            td { style: table_cell_style(true), {format_coverage(row.pipeline_coverage_x)} }
                            td { style: table_cell_style(true), {format_number(row.pipeline_avg_age_days)} }
                            td {
                                style: colored_cell_style(false, health_color(row.pipeline_health.as_ref())),
                                {row.pipeline_health.as_ref().map(PipelineHealth::as_str).unwrap_or_default()}
                            }
                            td { style: table_cell_style(false), "{row.rca_commentary}" }
                            td { style: table_cell_style(false), "{row.recommended_action}" }
                        }
                    }
                }
            }
        }
        {pager(view, &rendered)}
    }
}

#[component]
pub fn LossReasonSection(view: Signal<ViewController<LossReasonRow>>) -> Element {
    let rendered = view.read().render();

    rsx! {
        {filter_bar(view, LOSS_DIMENSIONS, Some("Search loss reasons"))}
        div {
            style: table_container_style(),
            table {
                style: table_style(),
                thead { {header_row(view, LOSS_COLUMNS)} }
                tbody {
                    for (idx, row) in rendered.rows.iter().enumerate() {
                        tr {
                            key: "{idx}",
                            td { style: table_cell_style(false), "{row.product}" }
                            td { style: table_cell_style(false), "{row.region}" }
                            td { style: table_cell_style(false), "{row.loss_reason}" }
                            td { style: table_cell_style(true), {format_number(row.deal_count)} }
                            td { style: table_cell_style(true), {format_currency(row.lost_acv)} }
                            td {
                                style: colored_cell_style(false, severity_color(&row.severity)),
                                "{row.severity}"
                            }
                        }
                    }
                }
            }
        }
        {pager(view, &rendered)}
    }
}

#[component]
pub fn DealSection(view: Signal<ViewController<DealDetail>>) -> Element {
    let rendered = view.read().render();
    let stats = deal_stats(&view.read().filtered_rows());

    rsx! {
        {filter_bar(view, DEAL_DIMENSIONS, Some("Search account, opportunity or owner"))}
        StatsBar { stats }
        div {
            style: table_container_style(),
            table {
                style: table_style(),
                thead { {header_row(view, DEAL_COLUMNS)} }
                tbody {
                    for (idx, row) in rendered.rows.iter().enumerate() {
                        tr {
                            key: "{idx}-{row.opportunity_id}",
                            td { style: table_cell_style(false), "{row.account_name}" }
                            td { style: table_cell_style(false), "{row.opportunity_name}" }
                            td { style: table_cell_style(false), "{row.product}" }
                            td { style: table_cell_style(false), {row.region.as_ref().map(Region::as_str).unwrap_or_default()} }
                            td { style: table_cell_style(false), "{row.category}" }
                            td { style: table_cell_style(true), {format_currency(row.acv)} }
                            td { style: table_cell_style(false), "{row.close_date}" }
                            td { style: table_cell_style(false), "{row.stage}" }
                            td { style: table_cell_style(false), {row.status().as_str()} }
                            td { style: table_cell_style(false), "{row.source}" }
                            td { style: table_cell_style(false), "{row.owner_name}" }
                            td { style: table_cell_style(false), {row.loss_reason.clone().unwrap_or_default()} }
                        }
                    }
                }
            }
        }
        {pager(view, &rendered)}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_column_resolves_on_its_row_type() {
        use crate::engine::{TableRow, Value};

        let deal: DealDetail = serde_json::from_str(
            r#"{"opportunity_id": "006X", "product": "POR", "region": "APAC",
                "category": "MIGRATION", "source": "TRADESHOW", "close_date": "2026-02-01"}"#,
        )
        .expect("deal should parse");

        for column in DEAL_COLUMNS {
            if column.key == "loss_reason" {
                continue;
            }
            assert!(
                deal.value(column.key) != Value::Null,
                "column {} should resolve",
                column.key
            );
        }
        for dimension in DEAL_DIMENSIONS {
            assert!(DealDetail::dimensions().contains(&dimension.key));
        }
        for dimension in ATTAINMENT_DIMENSIONS {
            assert!(AttainmentRow::dimensions().contains(&dimension.key));
        }
    }

    #[test]
    fn unlisted_labels_get_a_neutral_colour() {
        assert_eq!(severity_color(&Severity::Critical), rag_color("RED"));
        assert_eq!(severity_color(&Severity::Other("UNRATED".to_string())), NEUTRAL);
        assert_eq!(health_color(Some(&PipelineHealth::Healthy)), rag_color("GREEN"));
        assert_eq!(health_color(None), NEUTRAL);
    }

    #[test]
    fn deal_stats_render_counts() {
        let stats = deal_stats(&[]);

        assert_eq!(stats[0], Stat::new("Won", "0 ($0)"));
        assert_eq!(stats[3].value, "0%");
    }
}
