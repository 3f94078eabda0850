mod common;

use std::sync::Arc;
use std::time::Duration;

use vgdss::explorer::{Action, ExplorerConfig, ExplorerController, ExplorerUpdate};
use vgdss::session;

fn explorer(addr: std::net::SocketAddr) -> ExplorerController {
    ExplorerController::new(
        Arc::new(common::client_for(addr)),
        ExplorerConfig {
            page_size: 15,
            search_delay: Duration::from_millis(30),
        },
    )
}

fn echoed_query(controller: &ExplorerController) -> String {
    controller.page().games[0].extra["query"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn test_browse_against_backend() {
    let addr = common::spawn_backend().await;
    let mut controller = explorer(addr);

    controller.dispatch(Action::Refresh);
    assert_eq!(controller.settle().await, vec![ExplorerUpdate::PageApplied]);
    assert_eq!(controller.page_info().total_pages, 3);
    assert_eq!(controller.page_info().window, vec![1, 2, 3]);

    controller.dispatch(Action::SetGenre("Action".to_string()));
    controller.dispatch(Action::LastPage);
    controller.settle().await;

    assert_eq!(controller.state().page, 3);
    assert_eq!(controller.page().games[0].name.as_deref(), Some("Action-30"));
    assert!(!controller.page_info().has_next);
}

#[tokio::test]
async fn test_typing_sends_one_search() {
    let addr = common::spawn_backend().await;
    let mut controller = explorer(addr);

    controller.dispatch(Action::Refresh);
    controller.settle().await;
    let before = controller.fetches_issued();

    for text in ["h", "ha", "hal", "halo"] {
        controller.dispatch(Action::SearchInput(text.to_string()));
    }
    assert!(controller.search_pending());
    controller.settle().await;

    assert_eq!(controller.fetches_issued(), before + 1);
    assert!(echoed_query(&controller).contains("search=halo"));
}

#[tokio::test]
async fn test_session_script() {
    let addr = common::spawn_backend().await;
    let client = common::client_for(addr);
    let metadata = client.metadata().await.unwrap();
    let mut controller = explorer(addr);

    let script: &[u8] = b"genre Action\nplatforms\nbogus\n";
    let mut output = Vec::new();
    session::run(&mut controller, Some(&metadata), script, &mut output)
        .await
        .unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Platforms: PS4, Wii"));
    assert!(output.contains("unknown command 'bogus'"));
    assert!(output.contains("Action-0"));
    assert_eq!(controller.state().genre, "Action");
    assert!(controller.is_idle());
}

#[tokio::test]
async fn test_session_quit_stops_reading() {
    let addr = common::spawn_backend().await;
    let mut controller = explorer(addr);

    let script: &[u8] = b"quit\ngenre Sports\n";
    let mut output = Vec::new();
    session::run(&mut controller, None, script, &mut output)
        .await
        .unwrap();

    assert_eq!(controller.state().genre, "");
}
