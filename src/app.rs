use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::config::AppConfig;
use crate::ui::components::sections::{
    AttainmentSection, DealSection, LossReasonSection, PipelineSection, SourceSection,
};
use crate::ui::state::app_state::{AppState, Section};
use crate::ui::style::{root_container_style, tab_style, toolbar_style};
use crate::usecase::services::access::AccessGate;

const BUTTON_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 6px 12px; border-radius: 6px;";

const REPORT_EXTENSIONS: &[&str] = &["json", "csv", "xlsx", "xls"];

fn report_subtitle(report_date: &str, as_of_date: &str) -> String {
    match (report_date.is_empty(), as_of_date.is_empty()) {
        (true, true) => "Report loaded".to_string(),
        (false, true) => format!("Report date {report_date}"),
        (true, false) => format!("Data as of {as_of_date}"),
        (false, false) => format!("Report date {report_date} · data as of {as_of_date}"),
    }
}

fn show_error(title: &str, description: String) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let gate = use_hook(|| AccessGate::new(&config.allowed_domains));

    let mut state = AppState::new(config.items_per_page);
    let initial_email = config.user_email.clone();
    let mut email = use_signal(|| initial_email.clone().unwrap_or_default());
    let mut signed_in = {
        let gate = gate.clone();
        use_signal(move || gate.is_allowed(initial_email.as_deref()))
    };
    let mut denied = use_signal(|| false);

    let startup_report = config.report_path.clone();
    use_effect(move || {
        if !signed_in() {
            return;
        }
        if let Some(path) = startup_report.as_ref() {
            // Failure is already on the status line.
            let _ = state.open_report(path);
        }
    });

    let title = config.window_title.clone();

    if !signed_in() {
        let domains = gate.allowed_domains().join(", ");
        return rsx! {
            div {
                style: root_container_style(),
                h2 { "{title}" }
                p { "Sign in with your company email to continue." }
                div {
                    style: toolbar_style(),
                    input {
                        style: "{BUTTON_STYLE} min-width: 260px;",
                        r#type: "email",
                        placeholder: "name@company.com",
                        value: "{email}",
                        oninput: move |event| email.set(event.value()),
                    }
                    button {
                        style: BUTTON_STYLE,
                        onclick: move |_| {
                            let allowed = gate.is_allowed(Some(email.read().as_str()));
                            denied.set(!allowed);
                            signed_in.set(allowed);
                        },
                        "Continue"
                    }
                }
                if denied() {
                    p {
                        style: "color: #dc3545;",
                        "Access is limited to {domains} accounts."
                    }
                }
            }
        };
    }

    let busy = *state.busy.read();
    let status = state.status.read().clone();
    let current_section = *state.section.read();
    let has_source = state.service.read().source_label().is_some();
    let has_deals = state
        .report
        .read()
        .as_ref()
        .is_some_and(|report| report.has_deals());
    let subtitle = state
        .report
        .read()
        .as_ref()
        .map(|report| report_subtitle(&report.report_date, &report.period.as_of_date))
        .unwrap_or_else(|| "No report loaded".to_string());

    rsx! {
        div {
            style: root_container_style(),
            h2 { "{title}" }
            div { style: "color: #666; margin-bottom: 8px;", "{subtitle}" }

            div {
                style: toolbar_style(),
                button {
                    style: BUTTON_STYLE,
                    disabled: busy,
                    onclick: move |_| {
                        if let Some(path) = FileDialog::new()
                            .add_filter("Reports", REPORT_EXTENSIONS)
                            .add_filter("All files", &["*"])
                            .pick_file()
                        {
                            if let Err(err) = state.open_report(&path) {
                                show_error("Open report", err.to_string());
                            }
                        }
                    },
                    "Open Report"
                }
                button {
                    style: BUTTON_STYLE,
                    disabled: busy || !has_source,
                    onclick: move |_| {
                        if let Err(err) = state.reload_report() {
                            show_error("Reload report", err.to_string());
                        }
                    },
                    "Reload"
                }
                span { style: "color: #444;", "{status}" }
            }

            div {
                style: "display: flex; gap: 4px; margin: 8px 0;",
                for section in Section::ALL.iter().copied().filter(|section| *section != Section::Deals || has_deals) {
                    button {
                        key: "{section:?}",
                        style: tab_style(section == current_section),
                        onclick: move |_| state.section.set(section),
                        {section.label()}
                    }
                }
            }

            {match current_section {
                Section::Attainment => rsx! { AttainmentSection { view: state.attainment } },
                Section::Sources => rsx! { SourceSection { view: state.sources } },
                Section::Pipeline => rsx! { PipelineSection { view: state.pipeline } },
                Section::LossReasons => rsx! { LossReasonSection { view: state.loss_reasons } },
                Section::Deals => rsx! { DealSection { view: state.deals } },
            }}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtitle_skips_missing_dates() {
        assert_eq!(report_subtitle("", ""), "Report loaded");
        assert_eq!(report_subtitle("2026-01-15", ""), "Report date 2026-01-15");
        assert_eq!(
            report_subtitle("2026-01-15", "2026-01-14"),
            "Report date 2026-01-15 · data as of 2026-01-14"
        );
    }
}
