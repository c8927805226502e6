//! Property-based tests for tab session operations.
//!
//! For any sequence of opens, closes and switches after the first tab, the
//! tab count never drops below one, the active index stays in range and the
//! tab strip mirrors the sessions. Events are also drained only now and then,
//! so loads pile up in the queue; history must still list every finished
//! page load exactly once, in order.

use std::sync::Arc;

use novabrowse::database::Database;
use novabrowse::engine::headless::HeadlessEngineFactory;
use novabrowse::managers::storage_manager::{StorageManager, StorageManagerTrait};
use novabrowse::managers::tab_session_manager::{CloseOutcome, TabSessionManager, TabSessionManagerTrait};
use novabrowse::services::home_page::HomePage;
use novabrowse::ui::headless::HeadlessChrome;
use proptest::prelude::*;

/// Operations that can be performed on the session manager.
#[derive(Debug, Clone)]
enum TabOp {
    Open,
    Close(usize), // index modulo the current tab count
    Switch(usize),
    Popup,
}

fn new_manager() -> TabSessionManager<StorageManager, HeadlessEngineFactory, HeadlessChrome> {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    TabSessionManager::new(
        StorageManager::new(Arc::new(db)),
        HeadlessEngineFactory::new(),
        HeadlessChrome::new(),
        HomePage::inline(),
    )
}

/// User actions interleaved with occasional event draining.
#[derive(Debug, Clone)]
enum LoadOp {
    Navigate(usize),
    OpenTab(Option<usize>),
    Home,
    Switch(usize),
    Popup(usize),
    Pump,
}

fn arb_load_ops() -> impl Strategy<Value = Vec<LoadOp>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0..10usize).prop_map(LoadOp::Navigate),
            2 => prop::option::of(0..10usize).prop_map(LoadOp::OpenTab),
            1 => Just(LoadOp::Home),
            1 => (0..20usize).prop_map(LoadOp::Switch),
            1 => (0..10usize).prop_map(LoadOp::Popup),
            1 => Just(LoadOp::Pump),
        ],
        1..40,
    )
}

fn host_url(n: usize) -> String {
    format!("https://site{}.com", n)
}

fn arb_tab_ops() -> impl Strategy<Value = Vec<TabOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(TabOp::Open),
            3 => (0..20usize).prop_map(TabOp::Close),
            2 => (0..20usize).prop_map(TabOp::Switch),
            1 => Just(TabOp::Popup),
        ],
        1..60,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn tab_count_never_drops_below_one(ops in arb_tab_ops()) {
        let mut mgr = new_manager();
        mgr.open_tab(None);
        let mut expected_count: usize = 1;

        for op in &ops {
            match op {
                TabOp::Open => {
                    mgr.open_tab(Some("https://example.com"));
                    expected_count += 1;
                }
                TabOp::Close(idx) => {
                    let pick = idx % mgr.tab_count();
                    match mgr.close_tab(pick).unwrap() {
                        CloseOutcome::Closed(_) => expected_count -= 1,
                        CloseOutcome::ResetToHome => prop_assert_eq!(expected_count, 1),
                    }
                }
                TabOp::Switch(idx) => {
                    let pick = idx % mgr.tab_count();
                    mgr.set_active_tab(pick).unwrap();
                    prop_assert_eq!(mgr.active_index(), Some(pick));
                }
                TabOp::Popup => {
                    mgr.active_tab_mut().unwrap().engine.open_popup("https://popup.example");
                    expected_count += 1;
                }
            }
            mgr.pump_events();

            prop_assert_eq!(mgr.tab_count(), expected_count);
            prop_assert!(mgr.tab_count() >= 1);
            let active = mgr.active_index().unwrap();
            prop_assert!(active < mgr.tab_count());
            prop_assert_eq!(mgr.chrome().tab_labels.len(), mgr.tab_count());
            prop_assert_eq!(mgr.chrome().current_tab, Some(active));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn history_matches_finished_loads_with_batched_events(ops in arb_load_ops()) {
        let mut mgr = new_manager();
        mgr.open_tab(None);

        let mut expected: Vec<String> = Vec::new();
        // Pop-up loads are queued only once their request is routed.
        let mut requested_popups: Vec<String> = Vec::new();

        for op in &ops {
            match op {
                LoadOp::Navigate(n) => {
                    let url = mgr.navigate(&format!("site{}.com", n));
                    prop_assert_eq!(url, Some(host_url(*n)));
                    expected.push(host_url(*n));
                }
                LoadOp::OpenTab(Some(n)) => {
                    mgr.open_tab(Some(&host_url(*n)));
                    expected.push(host_url(*n));
                }
                LoadOp::OpenTab(None) => {
                    mgr.open_tab(None);
                }
                LoadOp::Home => mgr.navigate_home(),
                LoadOp::Switch(idx) => {
                    let pick = idx % mgr.tab_count();
                    mgr.set_active_tab(pick).unwrap();
                }
                LoadOp::Popup(n) => {
                    mgr.active_tab_mut().unwrap().engine.open_popup(&host_url(*n));
                    requested_popups.push(host_url(*n));
                }
                LoadOp::Pump => {
                    mgr.pump_events();
                    expected.append(&mut requested_popups);
                }
            }
        }
        mgr.pump_events();
        expected.append(&mut requested_popups);

        let mut recorded: Vec<String> = mgr
            .storage()
            .get_history(1000)
            .unwrap()
            .into_iter()
            .map(|e| e.url)
            .collect();
        recorded.reverse();
        prop_assert_eq!(recorded, expected);
    }
}
