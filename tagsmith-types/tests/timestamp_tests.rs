use tagsmith_types::Timestamp;

#[test]
fn tick_is_strictly_increasing() {
    let mut ts = Timestamp::now();
    for _ in 0..1000 {
        let next = ts.tick();
        assert!(next > ts);
        ts = next;
    }
}

#[test]
fn ordering_compares_wall_time_first() {
    let a = Timestamp::new(100, 5);
    let b = Timestamp::new(200, 0);
    assert!(a < b);
}

#[test]
fn logical_counter_breaks_ties() {
    let a = Timestamp::new(100, 0);
    let b = Timestamp::new(100, 1);
    assert!(a < b);
    assert_eq!(a, Timestamp::new(100, 0));
}

#[test]
fn serde_round_trip() {
    let ts = Timestamp::new(1_700_000_000_000, 3);
    let json = serde_json::to_string(&ts).unwrap();
    let back: Timestamp = serde_json::from_str(&json).unwrap();
    assert_eq!(ts, back);
}
