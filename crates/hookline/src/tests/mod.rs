//! Crate-level integration and BDD tests.

use std::io::Cursor;

use crate::event::{self, HookEvent};
use crate::{HookHost, handler_fn};


#[test]
fn end_to_end_stream_to_typed_event() {
    let input = Cursor::new(concat!(
        r#"{"schema_version":1,"type":"hook-event","seq":1,"#,
        r#""event":{"hook_event_name":"PostToolUse","tool_name":"shell","duration_ms":"15"}}"#,
        "\n",
    ));
    let mut durations = Vec::new();
    let summary = HookHost::with_diagnostics(Vec::new()).run(
        input,
        &mut handler_fn(|raw| {
            if let HookEvent::ToolCallFinished(finished) = event::bind(raw.clone()) {
                durations.push(finished.duration_ms());
            }
            Ok::<(), std::io::Error>(())
        }),
    );
    assert_eq!(summary.dispatched(), 1);
    assert_eq!(durations, vec![Some(15)]);
    assert_eq!(summary.handler_failures(), 0);
}
