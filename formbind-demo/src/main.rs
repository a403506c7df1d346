//! Person form demo
//!
//! Drives a validated person form from stdin:
//!
//! ```text
//! set Name alice        edit a field, runs field-level rules
//! set Age 30
//! set EmailAddress a@b.c
//! submit                runs the async uniqueness check
//! show                  print current messages
//! json                  dump the message store as JSON
//! quit
//! ```
//!
//! Logs go to `FORMBIND_LOG` (default `formbind-demo.log`) at
//! `FORMBIND_LOG_LEVEL` (default `debug`).

mod person;

use std::fs::File;
use std::str::FromStr;

use formbind::prelude::*;
use log::{LevelFilter, error, info};
use simplelog::{Config, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};

use person::Person;

fn init_logging() {
    let path = std::env::var("FORMBIND_LOG").unwrap_or_else(|_| "formbind-demo.log".into());
    let level = std::env::var("FORMBIND_LOG_LEVEL")
        .ok()
        .and_then(|l| LevelFilter::from_str(&l).ok())
        .unwrap_or(LevelFilter::Debug);
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("could not open log file {path}: {e}"),
    }
}

fn set_field(form: &ValidatedForm<Person>, field: &str, value: &str) -> Result<(), FormError> {
    let value = value.to_string();
    match field {
        "Name" => form.edit(field, |p| p.name = value)?,
        "EmailAddress" => form.edit(field, |p| p.email_address = value)?,
        "Age" => match value.parse::<i32>() {
            Ok(age) => form.edit(field, |p| p.age = age)?,
            Err(_) => {
                println!("Age must be a number");
                return Ok(());
            }
        },
        other => {
            println!("unknown field '{other}'");
            return Ok(());
        }
    };
    Ok(())
}

fn print_messages(form: &ValidatedForm<Person>) {
    let summary = form.summary();
    if summary.is_empty() {
        println!("no validation messages");
    } else {
        print!("{summary}");
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let provider = match InventoryProvider::<Person>::new() {
        Ok(p) => p,
        Err(e) => {
            error!("failed to load rule sets: {e}");
            eprintln!("failed to load rule sets: {e}");
            return;
        }
    };
    info!("loaded {} rule set(s) for Person", provider.len());

    let config = FormConfig::new("person")
        .on_valid_submit(|cx: &EditContext<Person>| {
            let person = cx.model().get();
            println!("submitted: {} ({}) <{}>", person.name, person.age, person.email_address);
        })
        .on_invalid_submit(|cx: &EditContext<Person>| {
            println!("submission has {} problem(s)", cx.messages().len());
        });
    let form = ValidatedForm::new(FormSource::Model(Person::default()), provider, config);

    // Re-render whenever validation state changes.
    let cx = form.context().clone();
    let _render = form.context().subscribe_validation_state_changed(move || {
        for field in cx.message_store().with(|s| s.fields().cloned().collect::<Vec<_>>()) {
            for message in cx.messages_for(&field) {
                println!("  {field}: {message}");
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let mut parts = line.trim().splitn(3, ' ');
        let result = match (parts.next(), parts.next(), parts.next()) {
            (Some("set"), Some(field), value) => set_field(&form, field, value.unwrap_or("")),
            (Some("submit"), _, _) => form.submit().await.map(|outcome| {
                println!("submit: {outcome:?}");
            }),
            (Some("show"), _, _) => {
                print_messages(&form);
                Ok(())
            }
            (Some("json"), _, _) => {
                let snapshot = form.context().message_store().with(MessageStore::snapshot);
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(json) => println!("{json}"),
                    Err(e) => println!("could not serialize messages: {e}"),
                }
                Ok(())
            }
            (Some("quit"), _, _) => break,
            (Some(""), _, _) | (None, _, _) => Ok(()),
            (Some(other), _, _) => {
                println!("unknown command '{other}'");
                Ok(())
            }
        };
        if let Err(e) = result {
            error!("{e}");
            println!("error: {e}");
        }
    }
}
