//! Unit tests for the in-memory engine's event sequences.

use std::cell::RefCell;
use std::rc::Rc;

use novabrowse::engine::headless::{HeadlessEngine, HeadlessEngineFactory};
use novabrowse::engine::{event_channel, EngineEvent, EngineEventKind, EngineEventSink, EngineFactory, WebEngine};
use tokio::sync::mpsc::UnboundedReceiver;

type Rx = UnboundedReceiver<EngineEvent<HeadlessEngine>>;

fn attached(tab_id: &str) -> (HeadlessEngine, Rx) {
    let (tx, rx) = event_channel();
    let mut engine = HeadlessEngine::new();
    engine.attach(EngineEventSink::new(tab_id, tx));
    (engine, rx)
}

/// Short names of the queued events, in order.
fn drain(rx: &mut Rx) -> Vec<String> {
    let mut names = Vec::new();
    while let Ok(event) = rx.try_recv() {
        let name = match event.kind {
            EngineEventKind::UrlChanged(url) => format!("url:{}", url),
            EngineEventKind::TitleChanged(title) => format!("title:{}", title),
            EngineEventKind::LoadProgress(p) => format!("progress:{}", p),
            EngineEventKind::LoadStarted => "started".to_string(),
            EngineEventKind::LoadFinished { ok } => format!("finished:{}", ok),
            EngineEventKind::NewWindowRequested(_) => "popup".to_string(),
        };
        names.push(name);
    }
    names
}

#[test]
fn test_navigate_emits_full_load_sequence() {
    let (mut engine, mut rx) = attached("t1");
    engine.navigate("https://openai.com/research");

    assert_eq!(
        drain(&mut rx),
        vec![
            "started",
            "url:https://openai.com/research",
            "progress:10",
            "title:openai.com",
            "progress:100",
            "finished:true",
        ]
    );
    assert_eq!(engine.url(), "https://openai.com/research");
    assert_eq!(engine.title(), "openai.com");
}

#[test]
fn test_events_carry_tab_id() {
    let (mut engine, mut rx) = attached("tab-42");
    engine.navigate("https://a.com");
    let event = rx.try_recv().unwrap();
    assert_eq!(event.tab_id, "tab-42");
}

#[test]
fn test_navigate_before_attach_is_deferred() {
    let (tx, mut rx) = event_channel();
    let mut engine = HeadlessEngine::new();
    engine.navigate("https://a.com");
    assert!(rx.try_recv().is_err());

    engine.attach(EngineEventSink::new("t", tx));
    assert!(drain(&mut rx).contains(&"url:https://a.com".to_string()));
}

#[test]
fn test_set_document_uses_data_uri_and_title() {
    let (mut engine, mut rx) = attached("t");
    engine.set_document("<html><head><title>Home</title></head><body>Hi</body></html>");
    drain(&mut rx);

    assert!(engine.url().starts_with("data:text/html;charset=UTF-8;base64,"));
    assert_eq!(engine.title(), "Home");
}

#[test]
fn test_back_and_forward() {
    let (mut engine, mut rx) = attached("t");
    engine.navigate("https://a.com");
    engine.navigate("https://b.com");
    assert!(engine.can_go_back());

    engine.back();
    assert_eq!(engine.url(), "https://a.com");
    assert!(engine.can_go_forward());

    engine.forward();
    assert_eq!(engine.url(), "https://b.com");
    assert!(!engine.can_go_forward());
    drain(&mut rx);
}

#[test]
fn test_back_without_history_is_noop() {
    let (mut engine, mut rx) = attached("t");
    engine.back();
    assert!(drain(&mut rx).is_empty());
    assert_eq!(engine.url(), "about:blank");
}

#[test]
fn test_held_load_completes_later() {
    let (tx, mut rx) = event_channel();
    let mut engine = HeadlessEngine::new();
    engine.set_hold_loads(true);
    engine.attach(EngineEventSink::new("t", tx));
    engine.navigate("https://slow.example");

    assert_eq!(drain(&mut rx), vec!["started", "url:https://slow.example", "progress:10"]);
    assert!(engine.complete_load());
    assert_eq!(drain(&mut rx), vec!["title:slow.example", "progress:100", "finished:true"]);
    assert!(!engine.complete_load());
}

#[test]
fn test_open_popup_hands_over_engine() {
    let (mut engine, mut rx) = attached("opener");
    engine.open_popup("https://popup.example");

    let event = rx.try_recv().unwrap();
    assert_eq!(event.tab_id, "opener");
    match event.kind {
        EngineEventKind::NewWindowRequested(mut popup) => {
            let (tx, mut popup_rx) = event_channel();
            popup.attach(EngineEventSink::new("popup", tx));
            assert!(drain(&mut popup_rx).contains(&"url:https://popup.example".to_string()));
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_extract_plain_text_strips_markup() {
    let (mut engine, mut rx) = attached("t");
    engine.set_document("<h1>Welcome</h1><p>to the <b>shell</b></p>");
    drain(&mut rx);

    let text = Rc::new(RefCell::new(String::new()));
    let slot = Rc::clone(&text);
    engine.extract_plain_text(Box::new(move |t| *slot.borrow_mut() = t));
    assert_eq!(*text.borrow(), "Welcome to the shell");
}

#[test]
fn test_factory_holding_loads() {
    let mut factory = HeadlessEngineFactory::holding_loads();
    let (tx, mut rx) = event_channel();
    let mut engine = factory.create_engine();
    engine.attach(EngineEventSink::new("t", tx));
    engine.navigate("https://a.com");
    assert_eq!(drain(&mut rx).len(), 3);
}
