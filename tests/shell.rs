use std::io::Cursor;
use kpbot::engine::{Algorithm, EngineConfig};
use kpbot::shell::{Reply, Shell};
use serde_json::Value;

fn shell() -> Shell { Shell::new(EngineConfig { algorithm: Algorithm::Heuristic, depth: 2, seed: Some(3) }) }

fn run(script: &str) -> Vec<String> {
    let mut out = Vec::new();
    shell().run(Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
}

fn parse(line: &str) -> Value { serde_json::from_str(line).unwrap() }

#[test]
fn setup_move_go_round_trip() {
    let lines = run("setup e1 e2 e8\nmove e8d7\ngo\nundo\nquit\nstate\n");
    assert_eq!(lines.len(), 4);
    assert_eq!(parse(&lines[0])["turn"], "black");
    assert_eq!(parse(&lines[1])["turn"], "white");
    let go = parse(&lines[2]);
    assert_eq!(go["turn"], "black");
    assert!(go["ai_move"]["analysis"]["decision_rule"].is_string());
    assert_eq!(go["history_count"], 3);
    assert_eq!(parse(&lines[3])["current_move_index"], 0);
}

#[test]
fn commands_before_setup_report_errors() {
    let lines = run("go\nmove e8 d7\n\nbogus\n");
    assert_eq!(lines.len(), 3);
    for l in &lines {
        assert!(parse(l)["error"].is_string(), "expected an error object, got {l}");
    }
}

#[test]
fn illegal_moves_and_bad_squares_are_errors() {
    let mut sh = shell();
    assert!(matches!(sh.handle_line("setup e1 e2 e8"), Reply::Json(_)));
    let Reply::Json(bad) = sh.handle_line("move e8 e6") else { panic!("expected json") };
    assert!(parse(&bad)["error"].as_str().unwrap().contains("illegal"));
    let Reply::Json(bad) = sh.handle_line("move q9 e6") else { panic!("expected json") };
    assert!(parse(&bad)["error"].is_string());
    assert_eq!(sh.handle_line("   "), Reply::Nothing);
    assert_eq!(sh.handle_line("quit"), Reply::Quit);
}

#[test]
fn config_updates_engine_settings() {
    let mut sh = shell();
    let Reply::Json(c) = sh.handle_line("config depth 3") else { panic!("expected json") };
    assert_eq!(parse(&c)["depth"], 3);
    let Reply::Json(c) = sh.handle_line("config algorithm minimax") else { panic!("expected json") };
    assert_eq!(parse(&c)["algorithm"], "minimax");
    let Reply::Json(c) = sh.handle_line("config algorithm alphazero") else { panic!("expected json") };
    assert!(parse(&c)["error"].is_string());
}

#[test]
fn board_prints_the_diagram() {
    let mut sh = shell();
    sh.handle_line("fen 4k3/8/8/8/8/8/4P3/4K3");
    let Reply::Text(t) = sh.handle_line("board") else { panic!("expected text") };
    assert!(t.starts_with("8 . . . . k . . ."));
    assert!(t.ends_with("a b c d e f g h"));
}
