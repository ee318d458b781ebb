use crate::di::{DnsServices, HttpPipeline};
use anyhow::Context;
use bytes::Bytes;
use dns_pin_domain::RequestOptions;
use http::Uri;
use std::io::Write;
use tracing::debug;

pub async fn resolve(dns: &DnsServices, host: &str) -> anyhow::Result<()> {
    let addresses = dns.resolver.resolve(host).await;
    debug!(
        host,
        negative_entries = dns.negative_cache.len(),
        "Resolution complete"
    );
    if addresses.is_empty() {
        anyhow::bail!("No DNS record found for {}", host);
    }

    for resolved in &addresses {
        println!("{}\t{}", resolved.address, resolved.hostname);
    }
    Ok(())
}

pub async fn check(dns: &DnsServices, url: &str, allow_local_address: bool) -> anyhow::Result<()> {
    let uri: Uri = url.parse().with_context(|| format!("Invalid URL: {}", url))?;

    if allow_local_address {
        println!("local addresses allowed, no pinning applied to {}", uri);
        return Ok(());
    }

    let pin_map = dns.middleware.pin(&uri).await?;
    println!("{}", pin_map);
    Ok(())
}

pub async fn fetch(
    pipeline: &HttpPipeline,
    url: &str,
    allow_local_address: bool,
    include_headers: bool,
) -> anyhow::Result<()> {
    let request = http::Request::builder()
        .method(http::Method::GET)
        .uri(url)
        .body(Bytes::new())
        .with_context(|| format!("Invalid URL: {}", url))?;

    let mut options = RequestOptions::new();
    options.allow_local_address = allow_local_address;

    let response = pipeline.handler.handle(request, options).await?;

    println!("{:?} {}", response.version(), response.status());
    if include_headers {
        for (name, value) in response.headers() {
            println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
    }
    println!();

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(response.body())?;
    stdout.flush()?;
    Ok(())
}
