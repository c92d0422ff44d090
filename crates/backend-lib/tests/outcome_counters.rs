//! Workflow outcome counters.
mod test_utils;

use std::collections::HashMap;
use std::sync::Arc;

use auth_backend::auth::AuthService;
use auth_backend::metrics::{LOGIN_FAILED, LOGIN_SUCCEEDED, REGISTER_FAILED, REGISTER_SUCCEEDED};
use auth_backend::storage::MemoryUserStore;
use auth_common::RegisterRequest;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use test_utils::*;

const EMAIL: &str = "a@x.com";
const PASSWORD: &str = "Abcdef1!";

#[test]
fn test_outcomes_are_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    // Counters are emitted on the calling thread after each await, so a
    // thread-local recorder on a current-thread runtime sees all of them.
    metrics::with_local_recorder(&recorder, || {
        rt.block_on(async {
            let auth = auth_with(Arc::new(MemoryUserStore::new()), Arc::new(test_issuer()));

            assert!(auth.register(RegisterRequest::new(EMAIL, PASSWORD)).await.success);
            assert!(!auth.register(RegisterRequest::new(EMAIL, PASSWORD)).await.success);

            assert!(auth.login(Some(EMAIL), Some(PASSWORD)).await.success);
            assert!(!auth.login(Some(EMAIL), Some("Wrong1!x")).await.success);
            assert!(!auth.login(None, Some(PASSWORD)).await.success);
        })
    });

    let counters: HashMap<String, u64> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(key, _, _, value)| match value {
            DebugValue::Counter(n) => Some((key.key().name().to_string(), n)),
            _ => None,
        })
        .collect();

    assert_eq!(counters.get(REGISTER_SUCCEEDED), Some(&1));
    assert_eq!(counters.get(REGISTER_FAILED), Some(&1));
    assert_eq!(counters.get(LOGIN_SUCCEEDED), Some(&1));
    assert_eq!(counters.get(LOGIN_FAILED), Some(&2));
}
