use super::*;

struct Recorder {
    queries: Vec<String>,
    hits: Vec<StockHit>,
}

impl Recorder {
    fn with_hits(n: usize) -> Self {
        Self {
            queries: Vec::new(),
            hits: (0..n)
                .map(|i| StockHit {
                    symbol: format!("60000{i}"),
                    name: format!("stock {i}"),
                    exchange: "SSE".into(),
                })
                .collect(),
        }
    }
}

impl SymbolSource for Recorder {
    fn search(&mut self, keyword: &str, limit: usize) -> Result<Vec<StockHit>> {
        assert_eq!(limit, RESULT_LIMIT);
        self.queries.push(keyword.to_string());
        Ok(self.hits.clone())
    }
}

#[test]
fn rapid_typing_debounces_to_one_request_for_the_last_value() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(3);
    let mut ac = SymbolSuggest::new();

    ac.on_input("600", t0);
    ac.on_input("6000", t0 + Duration::from_millis(100));
    ac.on_input("60000", t0 + Duration::from_millis(200));
    ac.poll(t0 + Duration::from_millis(250), &mut src);
    assert!(src.queries.is_empty(), "quiet period not yet elapsed");

    ac.poll(t0 + Duration::from_millis(500), &mut src);
    assert_eq!(src.queries, vec!["60000".to_string()]);
    assert!(ac.is_open());
}

#[test]
fn clearing_the_field_hides_and_fires_nothing() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(3);
    let mut ac = SymbolSuggest::new();

    ac.on_input("600", t0);
    ac.on_input("", t0 + Duration::from_millis(100));
    ac.poll(t0 + Duration::from_secs(1), &mut src);
    assert!(src.queries.is_empty());
    assert!(!ac.is_open());
}

#[test]
fn empty_results_keep_the_dropdown_hidden() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(0);
    let mut ac = SymbolSuggest::new();
    ac.on_input("999", t0);
    ac.poll(t0 + DEBOUNCE, &mut src);
    assert_eq!(src.queries.len(), 1);
    assert!(!ac.is_open());
}

#[test]
fn arrow_down_wraps_circularly() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(3);
    let mut ac = SymbolSuggest::new();
    ac.on_input("600", t0);
    ac.poll(t0 + DEBOUNCE, &mut src);

    for expected in [1, 2, 0, 1] {
        ac.on_key(NavKey::Down);
        assert_eq!(ac.active_index(), expected);
    }
}

#[test]
fn arrow_up_from_zero_wraps_to_last() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(3);
    let mut ac = SymbolSuggest::new();
    ac.on_input("600", t0);
    ac.poll(t0 + DEBOUNCE, &mut src);

    ac.on_key(NavKey::Up);
    assert_eq!(ac.active_index(), 2);
    ac.on_key(NavKey::Up);
    assert_eq!(ac.active_index(), 1);
}

#[test]
fn enter_commits_the_active_symbol() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(3);
    let mut ac = SymbolSuggest::new();
    ac.on_input("600", t0);
    ac.poll(t0 + DEBOUNCE, &mut src);

    ac.on_key(NavKey::Down);
    assert_eq!(ac.on_key(NavKey::Enter), KeyOutcome::Committed("600001".into()));
    assert!(!ac.is_open());
}

#[test]
fn escape_hides_without_committing() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(2);
    let mut ac = SymbolSuggest::new();
    ac.on_input("600", t0);
    ac.poll(t0 + DEBOUNCE, &mut src);

    assert_eq!(ac.on_key(NavKey::Escape), KeyOutcome::Handled);
    assert!(!ac.is_open());
    assert_eq!(ac.on_key(NavKey::Enter), KeyOutcome::Ignored);
}

#[test]
fn blur_hides_only_after_the_grace_delay() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(2);
    let mut ac = SymbolSuggest::new();
    ac.on_input("600", t0);
    ac.poll(t0 + DEBOUNCE, &mut src);
    assert!(ac.is_open());

    let t1 = t0 + Duration::from_secs(1);
    ac.on_blur(t1);
    ac.poll(t1 + Duration::from_millis(100), &mut src);
    assert!(ac.is_open(), "inside the grace window a click can still land");
    ac.poll(t1 + BLUR_GRACE, &mut src);
    assert!(!ac.is_open());
}

#[test]
fn refocus_with_prefilled_value_searches_again() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(2);
    let mut ac = SymbolSuggest::new();
    ac.on_focus("600519", t0);
    ac.poll(t0 + DEBOUNCE, &mut src);
    assert_eq!(src.queries, vec!["600519".to_string()]);
}

#[test]
fn stale_response_is_discarded_by_token() {
    let t0 = Instant::now();
    let mut ac = SymbolSuggest::new();

    ac.on_input("600", t0);
    let first = ac.take_due_search(t0 + DEBOUNCE).unwrap();

    ac.on_input("600519", t0 + DEBOUNCE);
    let second = ac.take_due_search(t0 + DEBOUNCE + DEBOUNCE).unwrap();
    assert!(second.token > first.token);

    // Newer response lands first.
    ac.accept(
        second.token,
        Ok(vec![StockHit {
            symbol: "600519".into(),
            name: "kweichow moutai".into(),
            exchange: "SSE".into(),
        }]),
    );
    // The slow early response must not clobber it.
    ac.accept(
        first.token,
        Ok(vec![StockHit {
            symbol: "600000".into(),
            name: "spdb".into(),
            exchange: "SSE".into(),
        }]),
    );

    assert!(ac.is_open());
    assert_eq!(ac.results()[0].symbol, "600519");
}

#[test]
fn response_for_a_cleared_field_is_dropped() {
    let t0 = Instant::now();
    let mut ac = SymbolSuggest::new();

    ac.on_input("600", t0);
    let ticket = ac.take_due_search(t0 + DEBOUNCE).unwrap();

    // The field is emptied while the request is still in flight.
    ac.on_input("", t0 + DEBOUNCE + Duration::from_millis(50));

    ac.accept(
        ticket.token,
        Ok(vec![StockHit {
            symbol: "600000".into(),
            name: "spdb".into(),
            exchange: "SSE".into(),
        }]),
    );
    assert!(!ac.is_open(), "a cleared field stays closed");
    assert!(ac.results().is_empty());
}

#[test]
fn typing_cancels_a_pending_blur_hide() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(2);
    let mut ac = SymbolSuggest::new();
    ac.on_input("600", t0);
    ac.poll(t0 + DEBOUNCE, &mut src);
    assert!(ac.is_open());

    let t1 = t0 + Duration::from_secs(1);
    ac.on_blur(t1);
    ac.on_input("6005", t1 + Duration::from_millis(50));
    ac.poll(t1 + BLUR_GRACE, &mut src);
    assert!(
        ac.is_open(),
        "typing keeps the dropdown alive past the old blur deadline"
    );
}

#[test]
fn independent_instances_share_nothing() {
    let t0 = Instant::now();
    let mut src = Recorder::with_hits(3);
    let mut a = SymbolSuggest::new();
    let mut b = SymbolSuggest::new();

    a.on_input("600", t0);
    a.poll(t0 + DEBOUNCE, &mut src);
    a.on_key(NavKey::Down);

    assert!(!b.is_open());
    assert_eq!(b.on_key(NavKey::Down), KeyOutcome::Ignored);
    assert_eq!(a.active_index(), 1);
}
