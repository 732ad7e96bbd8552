//! Shared test utilities for integration tests
//!
//! A spy remote service that counts calls, dispatch helpers that capture both
//! output streams, and environment isolation for tests that load configuration.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use stratus::cli::{Console, OutputMode};
use stratus::command::command_tree;
use stratus::error::RemoteError;
use stratus::remote::{Account, AccountBandwidth, ListOptions, RegionPage, RemoteService};
use stratus::session::SessionContext;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "STRATUS_API_KEY",
    "STRATUS_API_ENDPOINT",
    "STRATUS_OUTPUT",
];

/// What the spy answers with
#[derive(Clone)]
pub enum SpyReply {
    Succeed,
    Fail(&'static str),
}

/// Remote service double that records how often it was called
pub struct SpyService {
    calls: AtomicUsize,
    reply: SpyReply,
    account: Account,
}

impl SpyService {
    pub fn new(reply: SpyReply) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply,
            account: sample_account(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer<T>(&self, action: &str, value: T) -> Result<T, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            SpyReply::Succeed => Ok(value),
            SpyReply::Fail(cause) => Err(RemoteError::new(action, cause)),
        }
    }
}

#[async_trait]
impl RemoteService for SpyService {
    async fn get_account(&self) -> Result<Account, RemoteError> {
        self.answer("Error getting account information", self.account.clone())
    }

    async fn get_bandwidth(&self) -> Result<AccountBandwidth, RemoteError> {
        self.answer("Error getting account bandwidth", AccountBandwidth::default())
    }

    async fn list_regions(&self, _options: &ListOptions) -> Result<RegionPage, RemoteError> {
        self.answer("Error listing regions", RegionPage::default())
    }
}

pub fn sample_account() -> Account {
    Account {
        name: "user@example.com".to_string(),
        email: "user@example.com".to_string(),
        acls: vec!["manage_users".to_string()],
        balance: -120.50,
        pending_charges: 0.0,
        last_payment_date: "2024-05-01T10:00:00+00:00".to_string(),
        last_payment_amount: -50.0,
    }
}

/// Captured result of one dispatch
pub struct Captured {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Dispatch `args` against the full command tree with a session around `spy`.
pub fn dispatch(args: &[&str], authenticated: bool, spy: Arc<SpyService>) -> Captured {
    let registrar = command_tree().unwrap();
    let mut console = Console::new(Vec::new(), Vec::new());
    let code = registrar.dispatch_with(
        args.iter().copied(),
        move |_| {
            Ok(SessionContext::with_client(
                authenticated,
                spy,
                OutputMode::Human,
            ))
        },
        &mut console,
    );
    Captured {
        code,
        stdout: String::from_utf8_lossy(console.out()).to_string(),
        stderr: String::from_utf8_lossy(console.err()).to_string(),
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME inside `test_dir` and no STRATUS_*
/// variables set. The environment is restored afterwards.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<String>)> = ISOLATED_VARS
        .iter()
        .map(|key| (*key, std::env::var(key).ok()))
        .collect();

    let home = test_dir.path().join("home");
    let config_home = test_dir.path().join("config");
    std::fs::create_dir_all(&home).unwrap();
    std::fs::create_dir_all(&config_home).unwrap();

    for key in ISOLATED_VARS {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);

    let result = f();

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
    result
}
