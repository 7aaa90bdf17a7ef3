//! Offline decision tool.
//!
//! Loads a JSON fact snapshot into the in-memory providers and prints the
//! decision for one policy check.
//!
//! ```text
//! warden-cli [--env-flags] [--compact-logs] <facts.json> <policy> <project-id> [user-id]
//! ```
//!
//! Exit status: 0 allowed, 1 denied, 2 the decision could not be made.

use std::process::ExitCode;

use anyhow::{Context, bail};
use serde::Serialize;

use warden_authz::{
    Decision, EngineConfig, FeatureFlags, InMemoryLoaders, PolicyEngine, PolicyName, ProjectId,
    ProjectRequest, UserId,
};

const USAGE: &str =
    "usage: warden-cli [--env-flags] [--compact-logs] <facts.json> <policy> <project-id> [user-id]";

#[derive(Debug)]
struct Args {
    env_flags: bool,
    compact_logs: bool,
    facts_path: String,
    policy: PolicyName,
    request: ProjectRequest,
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut env_flags = false;
    let mut compact_logs = false;
    let mut positional = Vec::new();
    for arg in raw {
        match arg.as_str() {
            "--env-flags" => env_flags = true,
            "--compact-logs" => compact_logs = true,
            "-h" | "--help" => bail!(USAGE),
            _ => positional.push(arg),
        }
    }

    let (facts_path, policy, project_id, user_id) = match positional.as_slice() {
        [facts, policy, project] => (facts, policy, project, None),
        [facts, policy, project, user] => (facts, policy, project, Some(user)),
        _ => bail!(USAGE),
    };

    let policy: PolicyName = policy.parse()?;
    let project_id: ProjectId = project_id.parse().context("invalid project id")?;
    let user_id = user_id
        .map(|u| u.parse::<UserId>())
        .transpose()
        .context("invalid user id")?;

    Ok(Args {
        env_flags,
        compact_logs,
        facts_path: facts_path.clone(),
        policy,
        request: ProjectRequest {
            user_id,
            project_id,
        },
    })
}

fn load_facts(path: &str) -> anyhow::Result<InMemoryLoaders> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))
}

#[derive(Serialize)]
struct Report<'a> {
    policy: &'static str,
    request: &'a ProjectRequest,
    decision: &'a Decision,
}

async fn run(args: Args) -> anyhow::Result<Decision> {
    let mut loaders = load_facts(&args.facts_path)?;
    if args.env_flags {
        loaders = loaders.with_flags(FeatureFlags::from_env());
    }

    let config = EngineConfig::from_env()?;
    let engine = PolicyEngine::new(loaders).with_config(config);

    let decision = engine.decide(args.policy, &args.request).await?;

    let report = Report {
        policy: args.policy.as_str(),
        request: &args.request,
        decision: &decision,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(decision)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    if args.compact_logs {
        warden_observability::init_compact();
    } else {
        warden_observability::init();
    }

    match run(args).await {
        Ok(Decision::Allowed) => ExitCode::SUCCESS,
        Ok(Decision::Denied(_)) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "decision failed");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
