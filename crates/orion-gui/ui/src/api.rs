use orion_gui_shared::{CMD_UI_LOG, UiLogArg, UiLogArgs};
use serde::{Serialize, de::DeserializeOwned};
use tauri_wasm::{args, invoke};

pub async fn invoke_tauri<R, A>(cmd: &str, args_payload: &A) -> Result<R, String>
where
    R: DeserializeOwned,
    A: Serialize + ?Sized,
{
    let payload = args(args_payload).map_err(|e| format!("failed to encode args: {e}"))?;
    let value = invoke(cmd)
        .with_args(payload)
        .await
        .map_err(|e| format!("invoke error: {e:?}"))?;

    serde_wasm_bindgen::from_value(value).map_err(|e| format!("decode error: {e}"))
}

/// Mirrors a UI event into the backend log. Best effort.
pub fn ui_log(event: &str, detail: &str) {
    tracing::debug!(event, detail, "ui-debug");
    gloo::console::log!(format!("[ui-debug] {event}: {detail}"));

    let payload = UiLogArgs {
        args: UiLogArg {
            event: event.to_string(),
            detail: detail.to_string(),
        },
    };
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = invoke_tauri::<(), _>(CMD_UI_LOG, &payload).await {
            tracing::trace!(error = %err, "ui_log not delivered");
        }
    });
}
