//! # Todo List Testing
//!
//! Testing utilities and helpers for the to-do list service.
//!
//! This crate provides:
//! - Deterministic implementations of the collaborator traits
//! - In-memory and always-failing item stores
//! - Builders for a ready-to-use [`ItemService`]
//! - Property-based testing strategies for request payloads
//!
//! ## Example
//!
//! ```
//! use todo_list_testing::helpers::TestHarness;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let harness = TestHarness::new();
//! let item = harness
//!     .service
//!     .create(br#"{"label":"buy milk","completed":false}"#)
//!     .await?;
//!
//! assert_eq!(item.id.as_str(), "item-1");
//! assert_eq!(harness.store.len().await, 1);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use todo_list_core::environment::{Clock, IdGenerator};
use todo_list_core::service::ItemService;

pub mod store_mocks;

/// Mock implementations of the clock and identifier collaborators.
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_list_testing::mocks::FixedClock;
    /// use todo_list_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when told to.
    ///
    /// Clones share the same time, so a test can keep one handle and give
    /// another to the service.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Create a clock starting at `start`
        #[must_use]
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(start)),
            }
        }

        /// Move the clock by `by` (may be negative)
        pub fn advance(&self, by: chrono::Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Predictable identifiers: `item-1`, `item-2`, ...
    #[derive(Debug, Clone, Default)]
    pub struct SequentialIdGenerator {
        next: Arc<AtomicU64>,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at `item-1`
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn new_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            format!("item-{n}")
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_epoch())
    }

    /// The instant [`test_clock`] is pinned to.
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc)
    }
}

/// Builders for services wired to test collaborators.
pub mod helpers {
    use super::ItemService;
    use crate::mocks::{ManualClock, SequentialIdGenerator, test_epoch};
    use crate::store_mocks::{FailingItemStore, InMemoryItemStore};
    use std::sync::Arc;

    /// An [`ItemService`] plus handles on its collaborators.
    #[derive(Debug, Clone)]
    pub struct TestHarness {
        /// The service under test
        pub service: ItemService,
        /// The store the service writes to
        pub store: InMemoryItemStore,
        /// The clock the service reads, starting at 2025-01-01 00:00:00 UTC
        pub clock: ManualClock,
    }

    impl TestHarness {
        /// A harness over an empty store.
        #[must_use]
        pub fn new() -> Self {
            Self::with_store(InMemoryItemStore::new())
        }

        /// A harness over an existing store.
        #[must_use]
        pub fn with_store(store: InMemoryItemStore) -> Self {
            let clock = ManualClock::new(test_epoch());
            let service = ItemService::new(
                Arc::new(store.clone()),
                Arc::new(clock.clone()),
                Arc::new(SequentialIdGenerator::new()),
            );
            Self {
                service,
                store,
                clock,
            }
        }
    }

    impl Default for TestHarness {
        fn default() -> Self {
            Self::new()
        }
    }

    /// A service whose store fails every call.
    #[must_use]
    pub fn failing_service() -> ItemService {
        ItemService::new(
            Arc::new(FailingItemStore::default()),
            Arc::new(crate::mocks::test_clock()),
            Arc::new(SequentialIdGenerator::new()),
        )
    }

    /// Install a test-friendly tracing subscriber (idempotent).
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use serde_json::{Value, json};

    /// Non-empty labels, including whitespace and non-ASCII text.
    pub fn valid_label() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z0-9 ]{1,40}",
            "\\PC{1,20}",
            Just(" ".to_string()),
        ]
    }

    /// Payloads that pass validation.
    pub fn valid_payload() -> impl Strategy<Value = Value> {
        (valid_label(), any::<bool>())
            .prop_map(|(label, completed)| json!({"label": label, "completed": completed}))
    }

    /// JSON values that are neither a string nor null.
    pub fn non_string() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            Just(json!([])),
            Just(json!({})),
        ]
    }

    /// JSON values that are neither a boolean nor null.
    pub fn non_bool() -> impl Strategy<Value = Value> {
        prop_oneof![
            "[a-z]{0,8}".prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            Just(json!([true])),
            Just(json!({"value": true})),
        ]
    }

    /// Which part of a payload is broken.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Breakage {
        /// `label` is invalid
        pub label: bool,
        /// `completed` is invalid
        pub completed: bool,
    }

    /// Payloads with at least one invalid field, paired with which fields
    /// are invalid.
    pub fn invalid_payload() -> impl Strategy<Value = (Value, Breakage)> {
        let label = prop_oneof![
            valid_label().prop_map(|l| (Some(Value::from(l)), false)),
            Just((None::<Value>, true)),
            Just((Some(Value::from("")), true)),
            non_string().prop_map(|v| (Some(v), true)),
        ];
        let completed = prop_oneof![
            any::<bool>().prop_map(|b| (Some(Value::from(b)), false)),
            Just((None::<Value>, true)),
            non_bool().prop_map(|v| (Some(v), true)),
        ];

        (label, completed)
            .prop_filter("at least one field must be invalid", |((_, l), (_, c))| {
                *l || *c
            })
            .prop_map(|((label, label_bad), (completed, completed_bad))| {
                let mut payload = serde_json::Map::new();
                if let Some(label) = label {
                    payload.insert("label".to_string(), label);
                }
                if let Some(completed) = completed {
                    payload.insert("completed".to_string(), completed);
                }
                (
                    Value::Object(payload),
                    Breakage {
                        label: label_bad,
                        completed: completed_bad,
                    },
                )
            })
    }
}

// Re-export commonly used items
pub use helpers::TestHarness;
pub use mocks::{FixedClock, ManualClock, SequentialIdGenerator, test_clock};
pub use store_mocks::{FailingItemStore, InMemoryItemStore};
