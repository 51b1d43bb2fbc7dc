//! CLI для MinData
//!
//! Кодирует значения в hex-буфер и декодирует их обратно. Порог сжатия,
//! подход и ключ AES-GCM берутся из окружения (`MINDATA_*`) и могут быть
//! переопределены флагами.

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, TimeDelta};
use clap::{Parser, Subcommand, ValueEnum};
use mindata::{
    from_bytes_many_named, from_bytes_named, logging::init_logging, registry, to_bytes,
    to_bytes_many, ErrorExt, LogLevel, MinDataError, Options, Settings, Value,
};
use tracing::{debug, error, info, trace, warn};

/// Основная структура CLI аргументов
#[derive(Parser)]
#[command(name = "mindata-cli")]
#[command(version = version_string())]
#[command(about = "MinData CLI - encode and decode MinData buffers", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Порог сжатия в байтах (отрицательное значение отключает сжатие)
    #[arg(
        long,
        global = true,
        allow_hyphen_values = true,
        help = "Порог сжатия в байтах"
    )]
    threshold: Option<i64>,
    /// Ключ AES-GCM в hex
    #[arg(long, global = true, help = "Ключ AES-GCM в hex (16, 24 или 32 байта)")]
    key: Option<String>,
    /// Включить подробный вывод (debug)
    #[arg(short, long, global = true, help = "Включить подробный вывод для отладки")]
    verbose: bool,
    /// Подкоманда для выполнения
    #[command(subcommand)]
    command: Commands,
}

/// Подкоманды CLI
#[derive(Subcommand)]
enum Commands {
    /// Закодировать одно значение
    #[command(alias = "e")]
    Encode {
        #[arg(short, long, value_enum)]
        kind: Kind,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        value: String,
        /// Упаковать значение как указатель
        #[arg(long)]
        ptr: bool,
    },
    /// Закодировать несколько значений `kind:value`
    EncodeMany {
        #[arg(required = true, allow_hyphen_values = true)]
        items: Vec<String>,
    },
    /// Декодировать hex-буфер
    #[command(alias = "d")]
    Decode {
        #[arg(short, long, default_value = mindata::config::DEFAULT_APPROACH)]
        approach: String,
        #[arg(long)]
        hex: String,
        /// Буфер создан `encode-many`
        #[arg(long)]
        many: bool,
    },
    /// Список зарегистрированных подходов
    Approaches,
}

/// Вид значения для кодирования.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Bool,
    /// Наносекунды
    Duration,
    String,
    /// Строки через запятую
    Strings,
    /// Байты в hex
    Bytes,
    /// RFC 3339
    Time,
    Nil,
}

fn version_string() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("GIT_COMMIT"),
        ", built ",
        env!("BUILD_TIME"),
        ")"
    )
}

/// Точка входа в CLI
fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().context("Не удалось загрузить настройки")?;
    if cli.verbose {
        settings.log_level = "debug".to_string();
    }
    init_logging(&settings.log_level)
        .map_err(|e| anyhow::anyhow!("Ошибка инициализации логирования: {e}"))?;

    if let Some(threshold) = cli.threshold {
        settings.compression_threshold = threshold;
    }
    if let Some(key) = &cli.key {
        settings.aes_key_hex = Some(key.clone());
    }
    debug!(
        approach = %settings.approach,
        threshold = settings.compression_threshold,
        encrypted = settings.aes_key_hex.is_some(),
        "CLI settings"
    );

    if let Err(e) = handle_command(&cli, &settings) {
        eprintln!("Error: {}", error_message(&e));
        std::process::exit(1);
    }
    Ok(())
}

/// Обработчик выполнения команд
fn handle_command(
    cli: &Cli,
    settings: &Settings,
) -> Result<()> {
    match &cli.command {
        Commands::Encode { kind, value, ptr } => {
            let mut v = parse_value(*kind, value)?;
            if *ptr {
                v = Value::ptr(v);
            }
            let (bytes, name) = to_bytes(&v, &settings.to_options()?)?;
            println!("{}", hex::encode(bytes));
            println!("{name}");
        }
        Commands::EncodeMany { items } => {
            let values = items
                .iter()
                .map(|item| parse_item(item))
                .collect::<Result<Vec<_>>>()?;
            let (bytes, name) = to_bytes_many(&values, &settings.to_options()?)?;
            println!("{}", hex::encode(bytes));
            println!("{name}");
        }
        Commands::Decode {
            approach,
            hex: data,
            many,
        } => {
            let data = hex::decode(data.trim()).context("Некорректный hex")?;
            let opts = decode_options(settings)?;
            if *many {
                for v in from_bytes_many_named(&data, approach, &opts)? {
                    println!("{}", format_value(&v));
                }
            } else {
                println!("{}", format_value(&from_bytes_named(&data, approach, &opts)?));
            }
        }
        Commands::Approaches => {
            for name in registry::global().names() {
                println!("{name}");
            }
        }
    }
    Ok(())
}

/// Сообщение об ошибке для пользователя.
///
/// Ошибки MinData печатаются через `client_message`, подробности уходят в
/// лог с уровнем, который соответствует коду статуса.
fn error_message(e: &anyhow::Error) -> String {
    let Some(err) = e.chain().find_map(|c| c.downcast_ref::<MinDataError>()) else {
        return format!("{e:#}");
    };
    let code = err.status_code();
    let detail = err.log_message();
    match code.log_level() {
        LogLevel::Error => error!(%code, kind = %err.type_name(), %detail, "Command failed"),
        LogLevel::Warn => warn!(%code, kind = %err.type_name(), %detail, "Command failed"),
        LogLevel::Info => info!(%code, kind = %err.type_name(), %detail, "Command failed"),
        LogLevel::Debug => debug!(%code, kind = %err.type_name(), %detail, "Command failed"),
        LogLevel::Trace => trace!(%code, kind = %err.type_name(), %detail, "Command failed"),
    }
    err.client_message()
}

/// Для декодирования нужен только порог и ключ: подход передаётся явно.
fn decode_options(settings: &Settings) -> Result<Options> {
    let opts = Options::new().with_compression_threshold(settings.compression_threshold);
    Ok(match settings.aes_key()? {
        Some(key) => opts.with_aes_gcm(&key)?,
        None => opts,
    })
}

/// Разбирает элемент вида `kind:value`.
fn parse_item(item: &str) -> Result<Value> {
    let (kind, text) = item.split_once(':').unwrap_or((item, ""));
    let kind = <Kind as ValueEnum>::from_str(kind, true)
        .map_err(|e| anyhow::anyhow!("Неизвестный вид значения '{kind}': {e}"))?;
    parse_value(kind, text)
}

fn parse_num<T>(text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.trim()
        .parse()
        .with_context(|| format!("Некорректное число '{text}'"))
}

fn parse_value(
    kind: Kind,
    text: &str,
) -> Result<Value> {
    let v = match kind {
        Kind::Int8 => Value::Int8(parse_num(text)?),
        Kind::Int16 => Value::Int16(parse_num(text)?),
        Kind::Int32 => Value::Int32(parse_num(text)?),
        Kind::Int64 => Value::Int64(parse_num(text)?),
        Kind::Uint8 => Value::Uint8(parse_num(text)?),
        Kind::Uint16 => Value::Uint16(parse_num(text)?),
        Kind::Uint32 => Value::Uint32(parse_num(text)?),
        Kind::Uint64 => Value::Uint64(parse_num(text)?),
        Kind::Float32 => Value::Float32(parse_num(text)?),
        Kind::Float64 => Value::Float64(parse_num(text)?),
        Kind::Bool => Value::Bool(parse_num(text)?),
        Kind::Duration => Value::Duration(TimeDelta::nanoseconds(parse_num(text)?)),
        Kind::String => Value::from(text),
        Kind::Strings => {
            if text.is_empty() {
                Value::StringSlice(Vec::new())
            } else {
                Value::from(text.split(',').collect::<Vec<_>>())
            }
        }
        Kind::Bytes => Value::from(hex::decode(text.trim()).context("Некорректный hex")?),
        Kind::Time => Value::Time(
            DateTime::parse_from_rfc3339(text.trim())
                .with_context(|| format!("Некорректное время '{text}'"))?,
        ),
        Kind::Nil => {
            if !text.is_empty() {
                bail!("nil не принимает значение");
            }
            Value::Nil
        }
    };
    Ok(v)
}

/// Человекочитаемое представление значения.
fn format_value(v: &Value) -> String {
    fn list<T: ToString>(items: &[T]) -> String {
        let inner: Vec<String> = items.iter().map(ToString::to_string).collect();
        format!("[{}]", inner.join(", "))
    }

    match v {
        Value::Nil => "(nil)".to_string(),
        Value::Int8(x) => x.to_string(),
        Value::Int16(x) => x.to_string(),
        Value::Int32(x) => x.to_string(),
        Value::Int64(x) => x.to_string(),
        Value::Uint8(x) => x.to_string(),
        Value::Uint16(x) => x.to_string(),
        Value::Uint32(x) => x.to_string(),
        Value::Uint64(x) => x.to_string(),
        Value::Float32(x) => x.to_string(),
        Value::Float64(x) => x.to_string(),
        Value::Bool(x) => x.to_string(),
        Value::Duration(d) => format!("{d}"),
        Value::Ptr(Some(inner)) => format!("&{}", format_value(inner)),
        Value::Ptr(None) => "&(nil)".to_string(),
        Value::Int8Slice(xs) => list(xs),
        Value::Int16Slice(xs) => list(xs),
        Value::Int32Slice(xs) => list(xs),
        Value::Int64Slice(xs) => list(xs),
        Value::Uint16Slice(xs) => list(xs),
        Value::Uint32Slice(xs) => list(xs),
        Value::Uint64Slice(xs) => list(xs),
        Value::Float32Slice(xs) => list(xs),
        Value::Float64Slice(xs) => list(xs),
        Value::BoolSlice(xs) => list(xs),
        Value::DurationSlice(xs) => list(xs),
        Value::String(s) => format!("{s:?}"),
        Value::StringSlice(xs) => {
            let inner: Vec<String> = xs.iter().map(|s| format!("{s:?}")).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Bytes(b) => format!("0x{}", hex::encode(b)),
        Value::ByteSlices(bs) => {
            let inner: Vec<String> = bs.iter().map(|b| format!("0x{}", hex::encode(b))).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Time(t) => t.to_rfc3339(),
    }
}
