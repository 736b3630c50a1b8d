//! wikiview - render wiki view fragments from the command line.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::{
    collections::HashMap,
    fs,
    io::{Read, stdin},
    path::Path,
};
use wikiview::{
    VERSION,
    config::{ConfigHandle, SiteConfig},
    context::{ContextAssembler, Identity, PreferenceRecord, RequestFacts},
    generator::{FeedBuilder, FeedEntry, FeedIdentity},
    log,
    render::{Value, ValueRenderer},
    response::{ResponseBody, ResponseFormat, requested_format},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let config = config.snapshot();

    match cli.command {
        Commands::Render { input, key } => {
            let json: serde_json::Value = serde_json::from_str(&read_input(&input)?)
                .with_context(|| format!("invalid JSON in {}", input.display()))?;
            let html = ValueRenderer::from_config(&config).render(&Value::from(json), key.as_deref())?;
            println!("{html}");
        }
        Commands::Feed {
            input,
            host,
            title,
            head,
        } => {
            let entries: Vec<FeedEntry> = serde_json::from_str(&read_input(&input)?)
                .with_context(|| format!("invalid feed entries in {}", input.display()))?;
            let identity = match title.as_deref() {
                Some(title) => FeedIdentity::for_page(host.trim_end_matches('/'), title),
                None => FeedIdentity::SiteWide,
            };

            let xml = FeedBuilder::new(&config, &host).build(&identity, &config.admin.email, &entries)?;
            log!("feed"; "{} entries", entries.len());

            let body = ResponseBody::new(xml, head);
            match body.body() {
                Some(xml) => println!("{xml}"),
                None => {
                    println!("Content-Type: {}", ResponseFormat::Atom.content_type());
                    println!("Content-Length: {}", body.content_length());
                }
            }
        }
        Commands::Context {
            url,
            user_agent,
            user,
            userpage,
        } => {
            let mut request = RequestFacts::new(host_of(&url), url.as_str());
            request.user_agent = user_agent;
            request.query = query_of(&url);

            match requested_format(&request, &config) {
                Some(format) => log!("context"; "responds as {}", format.content_type()),
                None => log!("context"; "unsupported response type requested"),
            }

            let identity = user.map(Identity::new);
            let mut preferences = HashMap::new();
            if let (Some(user), Some(title)) = (&identity, userpage) {
                preferences.insert(
                    user.email.clone(),
                    PreferenceRecord {
                        userpage_title: Some(title),
                    },
                );
            }

            let ctx = ContextAssembler::new(&identity, &preferences).assemble(&request, config, VERSION);
            println!("{}", serde_json::to_string_pretty(&ctx)?);
        }
    }

    Ok(())
}

/// Load config from file, or fall back to defaults when the file is absent.
fn load_config(path: &Path) -> Result<ConfigHandle> {
    if path.exists() {
        ConfigHandle::load(path)
    } else {
        let config = SiteConfig::default();
        config.validate()?;
        Ok(ConfigHandle::new(config))
    }
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Scheme and authority of a URL: `http://localhost:8080/a?b` → `http://localhost:8080`
fn host_of(url: &str) -> &str {
    let authority_start = url.find("://").map_or(0, |i| i + 3);
    match url[authority_start..].find(['/', '?', '#']) {
        Some(end) => &url[..authority_start + end],
        None => url,
    }
}

/// Decoded query pairs of a URL: `/Home?_type=atom&a=b` → `[("_type", "atom"), ("a", "b")]`
fn query_of(url: &str) -> Vec<(String, String)> {
    let Some((_, query)) = url.split_once('?') else {
        return Vec::new();
    };
    let query = query.split_once('#').map_or(query, |(q, _)| q);
    let decode = |s: &str| {
        let s = s.replace('+', " ");
        urlencoding::decode(&s).map_or_else(|_| s.clone(), |d| d.into_owned())
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(k), decode(v))
        })
        .collect()
}
