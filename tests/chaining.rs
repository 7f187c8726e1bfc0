//! Integration tests for chaining functions that return wrappers.

use std::sync::{Arc, Mutex};

use tryable::prelude::*;
use tryable::{assert_cause, assert_success};

// Sync helpers

fn get_name() -> Try<String, String> {
    Try::of(|| Ok("John Doe".to_string()))
}

fn create_message(name: String) -> Try<String, String> {
    Try::of(|| Ok(format!("Hello World from {}!", name)))
}

fn record_message(log: &Mutex<Vec<String>>, message: &str) -> Try<(), String> {
    Try::of(|| {
        log.lock()
            .map_err(|e| e.to_string())?
            .push(message.to_string());
        Ok(())
    })
}

fn transform_message(message: String) -> Try<String, String> {
    Try::of(|| Ok(message.to_uppercase()))
}

#[test]
fn test_chain_functions_returning_try() {
    let log = Mutex::new(Vec::new());

    let result = get_name()
        .map(create_message)
        .flatten()
        .and_then(|m| record_message(&log, m).get())
        .flat_map(transform_message)
        .and_then(|m| record_message(&log, m).get());

    assert_success!(result, "HELLO WORLD FROM JOHN DOE!".to_string());
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "Hello World from John Doe!".to_string(),
            "HELLO WORLD FROM JOHN DOE!".to_string()
        ]
    );
}

#[test]
fn test_transformations() {
    let mut printed = None;
    let result = Try::<_, String>::of(|| Ok(7.0_f64))
        .map(|v| v * 2.0)
        .map(|v| v * 3.0)
        .map(|v| v / 2.0)
        .tap(|v| printed = Some(*v));

    assert_success!(result, 21.0);
    assert_eq!(printed, Some(21.0));
}

#[test]
fn test_failure_skips_remaining_steps() {
    let mut steps = 0;
    let result = Try::<i32, _>::of(|| Err("Failed!".to_string()))
        .map(|v| {
            steps += 1;
            v + 1
        })
        .flat_map(|v| Try::success(v * 2));

    assert_eq!(steps, 0);
    assert_cause!(result, "Failed!".to_string());
}

// Async helpers

fn get_name_async() -> AsyncTry<String, String> {
    AsyncTry::of(|| async { Ok("John Doe".to_string()) })
}

fn create_message_async(name: String) -> AsyncTry<String, String> {
    AsyncTry::of(move || async move { Ok(format!("Hello World from {}!", name)) })
}

fn transform_message_async(message: String) -> AsyncTry<String, String> {
    AsyncTry::of(move || async move { Ok(message.to_uppercase()) })
}

#[tokio::test]
async fn test_chain_functions_returning_async_try() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (first, second) = (Arc::clone(&log), Arc::clone(&log));

    let result = get_name_async()
        .map(create_message_async)
        .flatten()
        .and_then(move |m| {
            first.lock().map_err(|e| e.to_string())?.push(m.clone());
            Ok(())
        })
        .flat_map(transform_message_async)
        .and_then(move |m| {
            second.lock().map_err(|e| e.to_string())?.push(m.clone());
            Ok(())
        });

    assert_eq!(result.get().await, Ok("HELLO WORLD FROM JOHN DOE!".to_string()));
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_async_failure_skips_remaining_steps() {
    let t = AsyncTry::<String, _>::of(|| async { Err("Failed!".to_string()) })
        .map_async(|v| async move { Ok(v.to_uppercase()) })
        .map_async(|v| async move { Ok(v.to_lowercase()) });

    assert!(t.is_failure().await);
    assert_eq!(t.get_cause().await, Ok("Failed!".to_string()));
}

#[tokio::test]
async fn test_try_bridges_into_async() {
    let t = Try::<_, String>::success(2).map_async(|v| async move { Ok(v * 21) });
    assert_eq!(t.get().await, Ok(42));

    let t = Try::<i32, _>::failure("early".to_string()).map_async(|v| async move { Ok(v * 21) });
    assert_eq!(t.to_try().await, Try::Failure("early".to_string()));
}

#[tokio::test]
async fn test_resolve_into_either() {
    let either = get_name_async().resolve().await;
    assert_eq!(either.fold(|e| e, |name| name), "John Doe");

    let failed = AsyncTry::<i32, _>::failure(HttpError::bad_gateway()).resolve().await;
    assert_eq!(failed.swap().get().map(|e| e.status_code()), Ok(502));
}

#[test]
fn test_optional_feeds_try() {
    let t = Optional::from(Some(5))
        .filter(|v| *v > 3)
        .into_try(|| UsageError::EmptyOptional)
        .map(|v| v * 2);
    assert_success!(t, 10);

    let t = Optional::<i32>::empty().into_try(|| UsageError::EmptyOptional);
    assert_cause!(t, UsageError::EmptyOptional);
}
