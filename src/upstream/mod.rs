//! Bridge to the upstream Node card renderers.
//!
//! The two production handlers live in a github-readme-stats checkout as ES
//! modules. Each invocation spawns `node` with an inline bootstrap that
//! imports the module, feeds it the query, and reports what the module sent
//! (status code, whether it terminated, and the payload) as one JSON line on
//! stdout. The reply is replayed onto our own [`Response`] so the capture
//! adapter sees exactly what a direct in-process call would have produced.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;
use tokio::process::Command;

use crate::error::RenderError;
use crate::handler::{Handler, Query, Request, Response};

pub const STATS_MODULE: &str = "api/index.js";
pub const TOP_LANGS_MODULE: &str = "api/top-langs.js";

// The response object here mirrors the tolerant semantics of the upstream
// serverless runtime: headers dropped, chained status(), first send/end wins.
const BOOTSTRAP: &str = r#"
const [modulePath, queryJson] = process.argv.slice(1);
const { pathToFileURL } = await import("node:url");
const mod = await import(pathToFileURL(modulePath).href);
const handler = mod.default;
if (typeof handler !== "function") {
  console.log(JSON.stringify({ error: "not-callable" }));
} else {
  const req = { query: JSON.parse(queryJson) };
  let responded = false;
  let body = null;
  const res = {
    statusCode: 200,
    setHeader() {},
    status(code) { this.statusCode = code; return this; },
    send(payload) { if (!responded) { responded = true; body = payload; } return payload; },
    end(payload) { if (!responded) { responded = true; body = payload; } return payload; },
  };
  await handler(req, res);
  console.log(JSON.stringify({ statusCode: res.statusCode, responded, body }));
}
"#;

#[derive(Debug, Deserialize)]
struct BridgeReply {
    #[serde(default)]
    error: Option<String>,
    #[serde(rename = "statusCode", default = "default_status")]
    status_code: u16,
    #[serde(default)]
    responded: bool,
    #[serde(default)]
    body: Value,
}

fn default_status() -> u16 {
    200
}

/// One upstream handler module, located but not yet invoked.
#[derive(Debug)]
pub struct UpstreamModule {
    name: &'static str,
    path: PathBuf,
}

impl UpstreamModule {
    /// Locates `module` under the upstream checkout. Loading both modules up
    /// front lets a run fail before any output file is touched.
    pub fn load(grs_dir: &Path, module: &str, name: &'static str) -> Result<Self, RenderError> {
        let path = grs_dir.join(module);
        if !path.is_file() {
            return Err(RenderError::MissingHandler { name, path });
        }
        Ok(Self { name, path })
    }

    async fn invoke(&self, query: &Query) -> Result<BridgeReply> {
        let query_json = serde_json::to_string(query)?;
        let output = Command::new("node")
            .arg("--input-type=module")
            .arg("-e")
            .arg(BOOTSTRAP)
            .arg(&self.path)
            .arg(&query_json)
            .output()
            .await
            .with_context(|| format!("failed to spawn node for the {} handler", self.name))?;

        if !output.status.success() {
            bail!(
                "{} handler failed: {}",
                self.name,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        // The module may log to stdout itself; the bootstrap's reply is the
        // last non-empty line.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .with_context(|| format!("no reply from the {} handler", self.name))?;
        let reply: BridgeReply = serde_json::from_str(line.trim())
            .with_context(|| format!("unparseable reply from the {} handler", self.name))?;
        Ok(reply)
    }
}

impl Handler for UpstreamModule {
    fn handle<'a>(&'a self, req: &'a Request, res: &'a mut Response) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let reply = self.invoke(&req.query).await?;
            if reply.error.as_deref() == Some("not-callable") {
                return Err(RenderError::MissingHandler {
                    name: self.name,
                    path: self.path.clone(),
                }
                .into());
            }
            res.status(reply.status_code);
            if reply.responded {
                res.send(reply.body);
            }
            Ok(())
        })
    }
}
