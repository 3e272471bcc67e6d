use std::time::Instant;

use lampu_tui::app::App;
use lampu_tui::config::{Config, Mode};
use lampu_tui::presenter::StatusClass;
use lampu_tui::{catalog, lookup, project, ui, BarPalette, Presenter, ScenarioId};

#[test]
fn every_scenario_is_well_formed() {
    catalog::validate().unwrap();
    for id in ScenarioId::ALL {
        let scenario = lookup(id);
        assert!(!scenario.states.is_empty());
        let numbers: Vec<u32> = scenario.states.iter().map(|s| s.number).collect();
        assert_eq!(numbers, (1..=scenario.states.len() as u32).collect::<Vec<_>>());
        assert!(scenario.states.iter().all(|s| s.duration_secs > 0));
    }
}

#[test]
fn state_counts_match_summaries() {
    for id in ScenarioId::ALL {
        let scenario = lookup(id);
        assert_eq!(
            scenario.summary.state_count,
            format!("{} states", scenario.states.len())
        );
    }
}

#[test]
fn two_way_figures() {
    let plan = project(ScenarioId::TwoWay, BarPalette::Bucketed);
    assert_eq!(plan.rows.len(), 6);
    assert_eq!(plan.max_bar(), 20);
    assert_eq!(plan.summary.total_cycle, "~50 detik");
    assert_eq!(plan.summary.max_green, "20 detik");
}

#[test]
fn four_way_figures() {
    let plan = project(ScenarioId::FourWay, BarPalette::Bucketed);
    assert_eq!(plan.rows.len(), 12);
    assert_eq!(plan.summary.state_count, "12 states");
    let labels: Vec<&str> = plan.bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels.first(), Some(&"State 1"));
    assert_eq!(labels.last(), Some(&"State 12"));
}

#[test]
fn presenter_switches_without_leftovers() {
    let mut presenter = Presenter::new(ScenarioId::YShape, BarPalette::Uniform);
    for id in [
        ScenarioId::FourWay,
        ScenarioId::TwoWay,
        ScenarioId::TShape,
        ScenarioId::TShape,
    ] {
        let rows = presenter.render(id).rows.len();
        assert_eq!(rows, lookup(id).states.len());
    }
}

#[test]
fn status_classes_follow_light_colors() {
    let plan = project(ScenarioId::TShape, BarPalette::Bucketed);
    let lights: Vec<(&str, Option<StatusClass>)> = plan
        .rows
        .iter()
        .flat_map(|r| &r.cells[1..r.cells.len() - 2])
        .map(|c| (c.text.as_str(), c.status))
        .collect();
    for (text, status) in lights {
        let expected = match text {
            "Hijau" => Some(StatusClass::Active),
            "Kuning" => Some(StatusClass::Masked),
            "Merah" => Some(StatusClass::Inactive),
            other => panic!("unexpected light {other}"),
        };
        assert_eq!(status, expected);
    }
}

#[test]
fn snapshot_is_repeatable_and_tracks_selection() {
    let t0 = Instant::now();
    let mut app = App::new(ScenarioId::TwoWay, BarPalette::Bucketed, t0);
    let first = ui::render_to_string(&app, 120, 32).unwrap();
    assert_eq!(first, ui::render_to_string(&app, 120, 32).unwrap());
    assert!(first.contains("~50 detik"));

    app.select(ScenarioId::YShape, t0);
    let second = ui::render_to_string(&app, 120, 32).unwrap();
    assert!(second.contains("Pertigaan Y-Shape dipilih!"));
    assert!(second.contains("~120 detik"));
    assert!(second.contains("State 9"));
}

#[test]
fn json_export_round_trips_through_serde_json() {
    let config = Config::from_args(["--mode", "json", "--scenario", "simpangTiga"]).unwrap();
    assert_eq!(config.mode, Mode::Json);
    let mut out = Vec::new();
    lampu_tui::run::run_json(&config, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["scenario"], "tShape");
    assert_eq!(value["title"], "Pertigaan T-Shape");
    assert_eq!(value["headers"].as_array().unwrap().len(), 6);
}
