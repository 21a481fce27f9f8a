use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use chrono::NaiveDate;
use clap::Parser;
use npsdash_cli::commands::clients::ClientsArgs;
use npsdash_cli::commands::drill::DrillArgs;
use npsdash_cli::commands::layout::LayoutAction;
use npsdash_cli::commands::product::ProductArgs;
use npsdash_cli::commands::select::{SelectArgs, SelectTarget};
use npsdash_cli::commands::{clients, config, drill, layout, metrics, product, select, FilterArgs};
use npsdash_cli::{execute, Cli};
use serde_json::Value;
use tempfile::TempDir;

const REFERENCE_DATE: (&str, &str) = ("NPSDASH_DASHBOARD_REFERENCE_DATE", "2026-01-05");

fn sao_paulo_filters() -> FilterArgs {
    FilterArgs {
        estado: Some("SP".to_string()),
        today: NaiveDate::from_ymd_opt(2026, 1, 5),
        ..FilterArgs::default()
    }
}

#[test]
fn metrics_for_sao_paulo_matches_reference_example() {
    with_env(&[], || {
        let result = metrics::run(&sao_paulo_filters());
        assert_eq!(result.exit_code, 0, "expected successful derivation");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "metrics");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["metricas"]["total_clientes"], 4);
        assert_eq!(payload["data"]["metricas"]["nps_score"], 25.0);
        assert_eq!(payload["data"]["filtros"]["estado"], "SP");
        assert_eq!(payload["data"]["filtros_ativos"][0]["label"], "Estado: São Paulo");

        let names: Vec<&str> = payload["data"]["clientes"]
            .as_array()
            .map(|clients| clients.iter().filter_map(|client| client["nome"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["Maria Silva", "Ana Costa", "Patrícia Souza", "Isabela Gomes"]);
    });
}

#[test]
fn metrics_rejects_unknown_period_as_bad_request() {
    with_env(&[], || {
        let args =
            FilterArgs { periodo: Some("ultima-semana".to_string()), ..FilterArgs::default() };
        let result = metrics::run(&args);
        assert_eq!(result.exit_code, 1);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "bad_request");
        assert!(payload["message"].as_str().unwrap_or_default().contains("ultima-semana"));
    });
}

#[test]
fn metrics_reports_config_failure_for_invalid_env_override() {
    with_env(&[("NPSDASH_DASHBOARD_DEFAULT_PERIOD", "forever")], || {
        let result = metrics::run(&FilterArgs::default());
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "metrics");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn clients_lists_detractors_by_descending_score() {
    with_env(&[REFERENCE_DATE], || {
        let args = ClientsArgs {
            filters: FilterArgs {
                periodo: Some("ultimo-ano".to_string()),
                ..FilterArgs::default()
            },
            categoria: Some("Detrator".to_string()),
            sort: Some("nps_score".to_string()),
            desc: true,
            ..ClientsArgs::default()
        };
        let result = clients::run(&args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let scores: Vec<u64> = payload["data"]["rows"]
            .as_array()
            .map(|rows| rows.iter().filter_map(|row| row["nps_score"].as_u64()).collect())
            .unwrap_or_default();
        assert!(!scores.is_empty());
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]), "scores {scores:?}");
        assert!(scores.iter().all(|score| *score <= 6));

        assert_eq!(payload["data"]["rows"][0]["cor"], "vermelho");

        let first_cpf = payload["data"]["rows"][0]["cpf"].as_str().unwrap_or_default();
        assert!(first_cpf.starts_with("***.***"), "cpf should be masked: {first_cpf}");
    });
}

#[test]
fn clients_rejects_unknown_sort_field() {
    with_env(&[], || {
        let args = ClientsArgs { sort: Some("cpf".to_string()), ..ClientsArgs::default() };
        let result = clients::run(&args);
        assert_eq!(result.exit_code, 1);
        assert_eq!(parse_payload(&result.output)["error_class"], "bad_request");
    });
}

#[test]
fn select_city_sets_state_filter_and_breadcrumb() {
    with_env(&[REFERENCE_DATE], || {
        let args = SelectArgs {
            target: SelectTarget { city: Some("Fortaleza".to_string()), estado: None },
            today: None,
        };
        let result = select::run(&args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["message"], "Brasil > Ceará > Fortaleza");
        assert_eq!(payload["data"]["estado"]["filters"]["estado"], "CE");
        assert_eq!(payload["data"]["estado"]["selection"]["cidade"], "Fortaleza");
    });
}

#[test]
fn select_state_without_region_record_keeps_city_empty() {
    with_env(&[REFERENCE_DATE], || {
        let args = SelectArgs {
            target: SelectTarget { city: None, estado: Some("SC".to_string()) },
            today: None,
        };
        let result = select::run(&args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["estado"]["selection"]["estado"], "SC");
        assert_eq!(payload["data"]["estado"]["selection"]["cidade"], Value::Null);
        assert_eq!(payload["data"]["total_clientes"], 0);
    });
}

#[test]
fn select_uses_reference_date_flag_without_config_date() {
    with_env(&[], || {
        let argv = ["npsdash", "select", "--estado", "SP", "--today", "2026-01-05"];
        let cli = Cli::try_parse_from(argv).expect("arguments should parse");
        let result = execute(cli);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["message"], "Brasil > São Paulo > São Paulo");
        assert_eq!(payload["data"]["total_clientes"], 4);
    });
}

#[test]
fn select_requires_exactly_one_target() {
    assert!(Cli::try_parse_from(["npsdash", "select"]).is_err());
    assert!(
        Cli::try_parse_from(["npsdash", "select", "--city", "Recife", "--estado", "PE"]).is_err()
    );
}

#[test]
fn drill_resolves_tier_payload_with_sample() {
    with_env(&[], || {
        let args = DrillArgs {
            kind: "promotores".to_string(),
            filters: sao_paulo_filters(),
            produto_metricas: None,
        };
        let result = drill::run(&args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["contexto"]["type"], "promotores");
        assert_eq!(payload["data"]["contexto"]["payload"]["quantidade"], 2);
        assert_eq!(payload["data"]["amostra"].as_array().map(Vec::len), Some(2));
        assert!(payload["data"]["formula"].is_string());
    });
}

#[test]
fn drill_product_kind_uses_requested_product() {
    with_env(&[REFERENCE_DATE], || {
        let with_product = DrillArgs {
            kind: "comp_respondido".to_string(),
            filters: FilterArgs::default(),
            produto_metricas: Some("2".to_string()),
        };
        let payload = parse_payload(&drill::run(&with_product).output);
        assert!(payload["data"]["contexto"]["payload"].is_object());

        let without_product = DrillArgs { produto_metricas: None, ..with_product };
        let payload = parse_payload(&drill::run(&without_product).output);
        assert_eq!(payload["data"]["contexto"]["payload"], Value::Null);
    });
}

#[test]
fn drill_rejects_unknown_kind() {
    with_env(&[], || {
        let args = DrillArgs {
            kind: "receita".to_string(),
            filters: FilterArgs::default(),
            produto_metricas: None,
        };
        let result = drill::run(&args);
        assert_eq!(result.exit_code, 1);
        assert_eq!(parse_payload(&result.output)["error_class"], "bad_request");
    });
}

#[test]
fn product_truncates_series_to_period() {
    with_env(&[], || {
        let args =
            ProductArgs { id: "4".to_string(), periodo: Some("ultimos-3-meses".to_string()) };
        let result = product::run(&args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let series = payload["data"]["metricas"]["evolucao_mensal"].as_array().map(Vec::len);
        assert_eq!(series, Some(3));
        assert!(payload["data"]["csat"]["satisfied"].is_number());
        assert!(payload["data"]["variacao_tempo_resposta"]["formatted"].is_string());
    });
}

#[test]
fn layout_move_persists_and_reset_restores_default() {
    let dir = TempDir::new().expect("temp dir should be created");
    let storage = dir.path().join("state/storage.json");
    let storage_value = storage.display().to_string();

    with_env(&[("NPSDASH_STORAGE_PATH", storage_value.as_str())], || {
        let shown = parse_payload(&layout::run(&LayoutAction::Show).output);
        assert_eq!(shown["message"], "metrics, map, charts, table");

        let moved = layout::run(&LayoutAction::Move {
            active: "table".to_string(),
            over: Some("metrics".to_string()),
        });
        assert_eq!(moved.exit_code, 0);
        let moved = parse_payload(&moved.output);
        assert_eq!(moved["data"]["resultado"]["outcome"], "reordered");
        assert_eq!(moved["data"]["resultado"]["persisted"], true);

        let raw = fs::read_to_string(&storage).expect("storage file should exist");
        let stored: Value = serde_json::from_str(&raw).expect("storage should be JSON");
        assert_eq!(stored["dashboard-section-order"], r#"["table","metrics","map","charts"]"#);

        let restored = parse_payload(&layout::run(&LayoutAction::Show).output);
        assert_eq!(restored["message"], "table, metrics, map, charts");

        let ignored = parse_payload(
            &layout::run(&LayoutAction::Move { active: "map".to_string(), over: None }).output,
        );
        assert_eq!(ignored["data"]["resultado"]["outcome"], "ignored");

        let reset = parse_payload(&layout::run(&LayoutAction::Reset).output);
        assert_eq!(reset["message"], "metrics, map, charts, table");
    });
}

#[test]
fn layout_falls_back_to_default_on_corrupt_entry() {
    let dir = TempDir::new().expect("temp dir should be created");
    let storage = dir.path().join("storage.json");
    fs::write(&storage, r#"{"dashboard-section-order":"[\"metrics\",\"map\"]"}"#)
        .expect("fixture should be written");
    let storage_value = storage.display().to_string();

    with_env(&[("NPSDASH_STORAGE_PATH", storage_value.as_str())], || {
        let shown = parse_payload(&layout::run(&LayoutAction::Show).output);
        assert_eq!(shown["status"], "ok");
        assert_eq!(shown["message"], "metrics, map, charts, table");
    });
}

#[test]
fn layout_commands_repair_unreadable_storage_file() {
    let dir = TempDir::new().expect("temp dir should be created");
    let storage = dir.path().join("storage.json");
    fs::write(&storage, "not json").expect("fixture should be written");
    let storage_value = storage.display().to_string();

    with_env(&[("NPSDASH_STORAGE_PATH", storage_value.as_str())], || {
        let shown = parse_payload(&layout::run(&LayoutAction::Show).output);
        assert_eq!(shown["message"], "metrics, map, charts, table");

        let reset = layout::run(&LayoutAction::Reset);
        assert_eq!(reset.exit_code, 0, "reset output: {}", reset.output);
        let raw = fs::read_to_string(&storage).expect("storage file should exist");
        assert_eq!(serde_json::from_str::<Value>(&raw).ok(), Some(serde_json::json!({})));

        fs::write(&storage, "not json").expect("fixture should be written");
        let moved = layout::run(&LayoutAction::Move {
            active: "charts".to_string(),
            over: Some("metrics".to_string()),
        });
        assert_eq!(moved.exit_code, 0, "move output: {}", moved.output);
        assert_eq!(parse_payload(&moved.output)["data"]["resultado"]["persisted"], true);

        let restored = parse_payload(&layout::run(&LayoutAction::Show).output);
        assert_eq!(restored["message"], "charts, metrics, map, table");
    });
}

#[test]
fn layout_rejects_directory_storage_path() {
    let dir = TempDir::new().expect("temp dir should be created");
    let storage_value = dir.path().display().to_string();

    with_env(&[("NPSDASH_STORAGE_PATH", storage_value.as_str())], || {
        let result = layout::run(&LayoutAction::Show);
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

#[test]
fn config_reports_env_source_attribution() {
    with_env(&[("NPSDASH_LOG_LEVEL", "debug"), REFERENCE_DATE], || {
        let result = config::run();
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let message = payload["message"].as_str().unwrap_or_default();
        assert!(message.contains("- logging.level = debug (source: env (NPSDASH_LOG_LEVEL))"));
        assert!(message.contains(
            "- dashboard.reference_date = 2026-01-05 (source: env (NPSDASH_DASHBOARD_REFERENCE_DATE))"
        ));
        assert!(message.contains("- dashboard.default_period = ultimos-6-meses (source: default)"));
    });
}

#[test]
fn parsed_cli_dispatches_to_commands() {
    with_env(&[REFERENCE_DATE], || {
        let argv = ["npsdash", "metrics", "--regiao", "Sul", "--periodo", "ultimo-ano"];
        let cli = Cli::try_parse_from(argv).expect("arguments should parse");
        let payload = parse_payload(&execute(cli).output);
        assert_eq!(payload["command"], "metrics");
        assert_eq!(payload["data"]["metricas"]["total_clientes"], 4);
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "NPSDASH_STORAGE_PATH",
        "NPSDASH_DASHBOARD_DEFAULT_PERIOD",
        "NPSDASH_DASHBOARD_REFERENCE_DATE",
        "NPSDASH_LOGGING_LEVEL",
        "NPSDASH_LOGGING_FORMAT",
        "NPSDASH_LOG_LEVEL",
        "NPSDASH_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
