//! In-memory Nacos config service served from a wiremock `MockServer`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use nacos_config_domain::{ClientConfig, ConfigurationIdentity, ConfigurationRecord};
use parking_lot::Mutex;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const LOGIN_PATH: &str = "/nacos/v1/auth/login";
pub const CONFIGS_PATH: &str = "/nacos/v1/cs/configs";
pub const EXPIRED_BODY: &str = r#"{"status":403,"message":"token expired!"}"#;

type EntryKey = (String, String, String);

/// Shared state behind the fake server's responders.
#[derive(Default)]
pub struct FakeState {
    entries: Mutex<HashMap<EntryKey, (String, String)>>,
    logins: AtomicUsize,
    config_calls: AtomicUsize,
    expire_next: AtomicUsize,
    reject_logins: AtomicBool,
}

impl FakeState {
    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn config_calls(&self) -> usize {
        self.config_calls.load(Ordering::SeqCst)
    }

    /// Answer the next `count` configuration calls with the expired-token signature.
    pub fn expire_next(&self, count: usize) {
        self.expire_next.store(count, Ordering::SeqCst);
    }

    pub fn reject_logins(&self, reject: bool) {
        self.reject_logins.store(reject, Ordering::SeqCst);
    }

    pub fn seed(&self, record: &ConfigurationRecord) {
        self.entries.lock().insert(
            (record.namespace.clone(), record.group.clone(), record.key.clone()),
            (record.value.clone(), record.description.clone()),
        );
    }

    pub fn stored(&self, identity: &ConfigurationIdentity) -> Option<(String, String)> {
        self.entries.lock().get(&entry_key(identity)).cloned()
    }

    fn login(&self, _req: &Request) -> ResponseTemplate {
        if self.reject_logins.load(Ordering::SeqCst) {
            return ResponseTemplate::new(403).set_body_string("unknown user!");
        }
        let issued = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
        ResponseTemplate::new(200)
            .set_body_json(json!({"accessToken": format!("token-{}", issued), "tokenTtl": 18000}))
    }

    fn configs(&self, req: &Request) -> ResponseTemplate {
        self.config_calls.fetch_add(1, Ordering::SeqCst);

        if self
            .expire_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return ResponseTemplate::new(403).set_body_string(EXPIRED_BODY);
        }

        let query = pairs(req.url.query().unwrap_or_default().as_bytes());
        if !self.token_is_known(query.get("accessToken")) {
            return ResponseTemplate::new(403).set_body_string("invalid token");
        }

        match req.method.as_str() {
            "GET" => self.get(&query),
            "POST" => self.post(&pairs(&req.body)),
            "DELETE" => self.delete(&query),
            _ => ResponseTemplate::new(405),
        }
    }

    fn token_is_known(&self, token: Option<&String>) -> bool {
        let issued = self.logins();
        token
            .and_then(|t| t.strip_prefix("token-"))
            .and_then(|n| n.parse::<usize>().ok())
            .is_some_and(|n| n >= 1 && n <= issued)
    }

    fn get(&self, query: &HashMap<String, String>) -> ResponseTemplate {
        let Some(key) = key_from(query) else {
            return ResponseTemplate::new(400);
        };
        match self.entries.lock().get(&key) {
            Some((content, desc)) => ResponseTemplate::new(200).set_body_json(json!({
                "id": "1",
                "tenant": key.0,
                "group": key.1,
                "dataId": key.2,
                "content": content,
                "desc": desc,
                "md5": "ignored",
            })),
            None => ResponseTemplate::new(200).set_body_string("{}"),
        }
    }

    fn post(&self, form: &HashMap<String, String>) -> ResponseTemplate {
        let Some(key) = key_from(form) else {
            return ResponseTemplate::new(400);
        };
        let content = form.get("content").cloned().unwrap_or_default();
        let desc = form.get("desc").cloned().unwrap_or_default();
        self.entries.lock().insert(key, (content, desc));
        ResponseTemplate::new(200).set_body_string("true")
    }

    fn delete(&self, query: &HashMap<String, String>) -> ResponseTemplate {
        let Some(key) = key_from(query) else {
            return ResponseTemplate::new(400);
        };
        let removed = self.entries.lock().remove(&key).is_some();
        ResponseTemplate::new(200).set_body_string(removed.to_string())
    }
}

/// In-memory Nacos config service on a wiremock server.
pub struct FakeNacos {
    pub server: MockServer,
    pub state: Arc<FakeState>,
}

impl FakeNacos {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let state = Arc::new(FakeState::default());

        let login_state = state.clone();
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(move |req: &Request| login_state.login(req))
            .mount(&server)
            .await;

        let configs_state = state.clone();
        Mock::given(path(CONFIGS_PATH))
            .respond_with(move |req: &Request| configs_state.configs(req))
            .mount(&server)
            .await;

        Self { server, state }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.server.uri(), "nacos", "nacos")
    }
}

pub fn record(
    namespace: &str,
    group: &str,
    key: &str,
    value: &str,
    desc: &str,
) -> ConfigurationRecord {
    ConfigurationRecord::new(&ConfigurationIdentity::new(namespace, group, key), value, desc)
}

fn entry_key(identity: &ConfigurationIdentity) -> EntryKey {
    (identity.namespace().to_string(), identity.group().to_string(), identity.key().to_string())
}

fn key_from(fields: &HashMap<String, String>) -> Option<EntryKey> {
    Some((
        fields.get("tenant")?.clone(),
        fields.get("group")?.clone(),
        fields.get("dataId")?.clone(),
    ))
}

fn pairs(encoded: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(encoded).into_owned().collect()
}
