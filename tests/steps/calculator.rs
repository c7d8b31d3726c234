//! Steps for keypad input, remote evaluation and what ends up on screen

use crate::common::world::CalcWorld;
use cucumber::{given, then, when};
use tracing::debug;

// === API STUBS ===

#[given(expr = "the calculation API answers {word} with {float}")]
async fn given_api_answers(world: &mut CalcWorld, operation: String, result: f64) {
    world.mock_result(&operation, result).await;
}

#[given(expr = "the calculation API rejects {word} with status {int} and message {string}")]
async fn given_api_rejects(world: &mut CalcWorld, operation: String, status: u16, message: String) {
    world.mock_failure(&operation, status, &message).await;
}

#[given("the calculator is running")]
async fn given_calculator_running(world: &mut CalcWorld) {
    world.start().await.expect("Failed to start calculator");
}

// === INPUT ===

#[when(expr = "I type {string}")]
async fn when_type(world: &mut CalcWorld, keys: String) {
    debug!("Typing {:?}", keys);
    world.type_keys(&keys).expect("Failed to type keys");
}

#[when(expr = "I press {word}")]
async fn when_press(world: &mut CalcWorld, key: String) {
    debug!("Pressing {}", key);
    world.press_key(&key).expect("Failed to press key");
}

#[when("the calculation completes")]
async fn when_calculation_completes(world: &mut CalcWorld) {
    let applied = world.settle().await.expect("Failed to settle");
    assert!(applied, "no calculation was in flight");
}

// === DISPLAY ===

#[then(expr = "the display shows {string}")]
async fn then_display_shows(world: &mut CalcWorld, expected: String) {
    assert_eq!(world.view_model().display_text(), expected);
    assert!(
        world.screen_contains(&expected),
        "screen does not show {expected:?}"
    );
}

#[then(expr = "the pending line shows {string}")]
async fn then_pending_line_shows(world: &mut CalcWorld, expected: String) {
    assert_eq!(world.view_model().pending_line(), Some(expected));
}

#[then("no operation is pending")]
async fn then_nothing_pending(world: &mut CalcWorld) {
    assert_eq!(world.view_model().pending_line(), None);
}

#[then(expr = "the error message is {string}")]
async fn then_error_message(world: &mut CalcWorld, expected: String) {
    assert_eq!(world.view_model().error_message(), Some(expected.as_str()));
    assert!(world.screen_contains(&expected));
}

#[then("no error is shown")]
async fn then_no_error(world: &mut CalcWorld) {
    assert_eq!(world.view_model().error_message(), None);
}

// === HISTORY ===

#[then(expr = "the latest history entry is {string}")]
async fn then_latest_history(world: &mut CalcWorld, expected: String) {
    let entries = world.view_model().history_entries();
    assert_eq!(entries.first().copied(), Some(expected.as_str()));
    assert!(world.screen_contains(&expected));
}

#[then(expr = "the history has {int} entries")]
async fn then_history_len(world: &mut CalcWorld, expected: usize) {
    assert_eq!(world.view_model().history_entries().len(), expected);
}

#[then("the screen shows the empty history")]
async fn then_empty_history_on_screen(world: &mut CalcWorld) {
    assert!(world.screen_contains("No calculations yet"));
}

// === LIFECYCLE ===

#[then("the calculator has quit")]
async fn then_quit(world: &mut CalcWorld) {
    assert!(world.should_quit());
}
