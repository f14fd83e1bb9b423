use holdem_engine::config::TableConfig;
use holdem_engine::engine::{ActionProvider, Table};
use holdem_engine::events::NullNotifier;
use holdem_engine::game::TableView;
use holdem_engine::logger::{format_hand_id, HandLogger, HandRecord};
use holdem_engine::player::PlayerAction;

struct Station;

impl ActionProvider for Station {
    fn get_action(&mut self, view: &TableView) -> PlayerAction {
        if view.legal.can_check {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        }
    }
}

#[test]
fn hand_ids_are_zero_padded() {
    assert_eq!(format_hand_id("20250102", 123), "20250102-000123");
}

#[test]
fn records_round_trip_through_jsonl() {
    let dir = std::env::temp_dir().join(format!("holdem-records-{}", std::process::id()));
    let path = dir.join("hands.jsonl");
    let cfg = TableConfig::new(5, 10, 300).with_seed(99);
    let mut table = Table::new(cfg, ["a", "b"]).unwrap();
    let mut seats = [Station, Station];

    let mut logger = HandLogger::create(&path).unwrap();
    let mut written = Vec::new();
    for _ in 0..3 {
        let summary = table.play_hand(&mut seats, &mut NullNotifier).unwrap();
        written.push(logger.log_summary(&summary).unwrap());
    }
    drop(logger);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    for (line, rec) in lines.iter().zip(&written) {
        let back: HandRecord = serde_json::from_str(line).unwrap();
        assert_eq!(back.hand_id, rec.hand_id);
        assert_eq!(back.actions, rec.actions);
        assert_eq!(back.board.len(), 5);
        assert!(back.ts.is_some());
        assert!(back.showdown.is_some());
    }
    assert!(written[0].hand_id.ends_with("-000001"));
    assert!(written[2].hand_id.ends_with("-000003"));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn append_keeps_earlier_records() {
    let dir = std::env::temp_dir().join(format!("holdem-append-{}", std::process::id()));
    let path = dir.join("hands.jsonl");
    let _ = std::fs::remove_file(&path);

    let mut table = Table::new(TableConfig::default().with_seed(4), ["a", "b"]).unwrap();
    let mut seats = [Station, Station];
    for _ in 0..2 {
        let summary = table.play_hand(&mut seats, &mut NullNotifier).unwrap();
        let mut logger = HandLogger::append(&path).unwrap();
        logger.log_summary(&summary).unwrap();
    }

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
    let _ = std::fs::remove_dir_all(dir);
}
