//! lrudemo - wires a cache, subscribes to evictions, and exercises it

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use lrucache::{Cache, CacheConfig, Evicted, LruCache};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Number of keyN/valueN pairs to add
    #[arg(short, long, default_value_t = 4)]
    keys: usize,
}

/// Build the shared cache the rest of the program sees only as `dyn Cache`
fn build_cache(capacity: usize) -> Result<Arc<dyn Cache<String, String>>> {
    let cache: LruCache<String, String> = CacheConfig::new(capacity).name("demo").build()?;
    Ok(Arc::new(cache))
}

fn describe(event: &Evicted<String, String>) -> String {
    format!(
        "Item with key '{}' and value '{}' was evicted.",
        event.key(),
        event.value()
    )
}

/// Add `keys` entries, then read back the newest one
fn run(cache: &dyn Cache<String, String>, keys: usize) -> Result<Option<String>> {
    for i in 1..=keys {
        cache.add(format!("key{}", i), format!("value{}", i));
    }

    if keys == 0 {
        return Ok(None);
    }
    Ok(Some(cache.get(&format!("key{}", keys))?))
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting lrudemo v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);

    let cache = build_cache(args.capacity)?;
    cache.on_evicted(Box::new(|event: &Evicted<String, String>| {
        println!("{}", describe(event));
    }));

    if let Some(value) = run(cache.as_ref(), args.keys)? {
        println!("{}", value);
    }

    info!("Resident entries: {}", cache.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_default_run_evicts_first_key() {
        let cache = build_cache(3).unwrap();
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = evicted.clone();
        cache.on_evicted(Box::new(move |event: &Evicted<String, String>| {
            sink.lock().unwrap().push(describe(event));
        }));

        let value = run(cache.as_ref(), 4).unwrap();

        assert_eq!(value.as_deref(), Some("value4"));
        assert_eq!(
            *evicted.lock().unwrap(),
            vec!["Item with key 'key1' and value 'value1' was evicted.".to_string()]
        );
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_zero_capacity_fails() {
        assert!(build_cache(0).is_err());
    }

    #[test]
    fn test_no_keys() {
        let cache = build_cache(1).unwrap();
        assert_eq!(run(cache.as_ref(), 0).unwrap(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["lrudemo"]);
        assert_eq!(args.capacity, 3);
        assert_eq!(args.keys, 4);
    }
}
