// src/session.rs
// Authenticated access to the game server. One `Session` owns a ureq agent
// whose cookie jar carries the login; everything that needs the site goes
// through the `GameClient` trait instead of reaching for a global.

use std::thread;
use std::time::Duration;

use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::html::{attr_value, next_tag_block_ci, strip_tags, to_lower};
use crate::scrape::form;

const USER_AGENT: &str = concat!("kf_raider/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

// Transient transport failures are retried with a growing pause before the
// error escalates to fatal.
const TRANSPORT_RETRIES: u32 = 3;
const RETRY_PAUSE: Duration = Duration::from_secs(2);

/// The one authenticated-request capability. Commands and services take
/// this, never a concrete agent, so tests can feed canned pages.
pub trait GameClient {
    /// GET a path relative to the game server, returning the page body.
    fn get(&self, path: &str) -> Result<String>;

    /// POST a urlencoded form to a path relative to the game server.
    fn post_form(&self, path: &str, fields: &[(String, String)]) -> Result<String>;
}

pub struct Session {
    agent: ureq::Agent,
    server: String,
}

impl Session {
    /// Run the full login dance: landing page -> moonid login link ->
    /// login form + csrf -> credentials POST -> redirect chain back to the
    /// game server. Any deviation is an `Authentication` error.
    pub fn login(config: &Config) -> Result<Self> {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .redirects(10)
            .user_agent(USER_AGENT)
            .build();

        log::info!("Logging in to {}", config.server);

        let home = agent.get(&config.server).call()?;
        let home_body = read_body(home)?;

        let login_url = find_login_link(&home_body).ok_or_else(|| {
            Error::Authentication("no login link on the landing page".into())
        })?;

        let resp = agent.get(&login_url).call()?;
        let form_base = Url::parse(resp.get_url())
            .map_err(|e| Error::Authentication(format!("bad login page url: {}", e)))?;
        let login_page = read_body(resp)?;

        let mut login_form = form::form_with_action(&login_page, "/account/login/")
            .ok_or_else(|| Error::Authentication("login form not found".into()))?;
        login_form.set_field("username", &config.account);
        login_form.set_field("password", &config.password);

        let action = form_base
            .join(&login_form.action)
            .map_err(|e| Error::Authentication(format!("bad login form action: {}", e)))?;

        let pairs: Vec<(&str, &str)> = login_form
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let resp = agent
            .post(action.as_str())
            .set("Referer", form_base.as_str())
            .send_form(&pairs)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    Error::Authentication(format!("login rejected with HTTP {}", code))
                }
                other => other.into(),
            })?;

        // The redirect chain must end back on the game server, where the
        // session cookie got set; anywhere else means bad credentials.
        let final_url = Url::parse(resp.get_url())
            .map_err(|e| Error::Authentication(format!("bad post-login url: {}", e)))?;
        let server_url = Url::parse(&config.server)
            .map_err(|e| Error::Config(format!("KF_SERVER is not a url: {}", e)))?;
        if final_url.host_str() != server_url.host_str() {
            return Err(Error::Authentication(format!(
                "login did not return to the game server (landed on {})",
                final_url
            )));
        }
        read_body(resp)?;

        log::info!("Logged in as {}", config.account);

        Ok(Self {
            agent,
            server: config.server.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.server, path.trim_start_matches('/'))
    }

    fn call_with_retry<F>(&self, url: &str, send: F) -> Result<String>
    where
        F: Fn() -> std::result::Result<ureq::Response, ureq::Error>,
    {
        let mut attempt = 0u32;
        loop {
            match send() {
                Ok(resp) => return read_body(resp),
                Err(ureq::Error::Transport(t)) if attempt < TRANSPORT_RETRIES => {
                    attempt += 1;
                    log::warn!(
                        "transport trouble on {} (attempt {}/{}): {}",
                        url,
                        attempt,
                        TRANSPORT_RETRIES,
                        t
                    );
                    thread::sleep(RETRY_PAUSE * attempt);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl GameClient for Session {
    fn get(&self, path: &str) -> Result<String> {
        let url = self.url_for(path);
        self.call_with_retry(&url, || self.agent.get(&url).call())
    }

    fn post_form(&self, path: &str, fields: &[(String, String)]) -> Result<String> {
        let url = self.url_for(path);
        let pairs: Vec<(&str, &str)> = fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.call_with_retry(&url, || self.agent.post(&url).send_form(&pairs))
    }
}

/// The landing page advertises login through a `moonid-button` anchor
/// labelled "Login".
fn find_login_link(doc: &str) -> Option<String> {
    let mut pos = 0usize;
    while let Some((a_s, a_e)) = next_tag_block_ci(doc, "<a", "</a>", pos) {
        let link = &doc[a_s..a_e];
        pos = a_e;

        let open_end = link.find('>')?;
        let open_tag = &link[..open_end + 1];
        if !to_lower(open_tag).contains("moonid-button") {
            continue;
        }
        if strip_tags(&link[open_end + 1..]) == "Login" {
            return attr_value(open_tag, "href");
        }
    }
    None
}

fn read_body(resp: ureq::Response) -> Result<String> {
    let url = resp.get_url().to_string();
    resp.into_string()
        .map_err(|e| Error::Transport(format!("failed to read body from {}: {}", url, e)))
}
