//! Basic logger usage example
//!
//! Demonstrates the logging facade with the default console backend,
//! level inheritance, JSON output and request-context logging.
//!
//! Run with: cargo run --example basic_usage

use ctx_logger::prelude::*;
use ctx_logger::{debug, error, info, info_ctx, trace, warn};

fn handle_request(logger: &dyn CtxLogger, ctx: &Context, path: &str) {
    info_ctx!(logger, ctx, "handling {}", path);
}

fn main() -> Result<()> {
    println!("=== ctx_logger - Basic Usage Example ===\n");

    // Root at Trace: children inherit it until they set their own level
    let factory = DefaultLoggerFactory::builder()
        .level(LogLevel::Trace)
        .component("demo")
        .appender(ConsoleAppender::new())
        .build();
    let logger = factory.get_logger("main");

    println!("1. Logging at different levels:");
    trace!(logger, "This is a trace message");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");

    println!("\n2. Raising the level on one logger:");
    let quiet = factory.get_logger("quiet");
    quiet.set_level(LogLevel::Warn);
    println!("   'quiet' set to WARN - debug and info won't show:");
    debug!(quiet, "Debug message (hidden)");
    info!(quiet, "Info message (hidden)");
    warn!(quiet, "Warning message (visible)");
    println!("   'main' still follows the root at {}:", logger.level());
    debug!(logger, "Debug message (visible)");

    println!("\n3. JSON envelope on stdout:");
    let json = DefaultLoggerFactory::builder()
        .level(LogLevel::Info)
        .component("billing")
        .appender(ConsoleAppender::json())
        .build();
    let payments = json.get_logger("payments");
    warn!(payments, "invoice {} is overdue", 1042);

    println!("\n4. Request context carrying a trace:");
    let ctx = Context::background()
        .with_value(CLOUD_TRACE_CONTEXT, "projects/demo-project/traces/0af7651916cd43dd");
    handle_request(payments.as_ref(), &ctx, "/invoices/1042");
    handle_request(logger.as_ref(), &Context::background(), "/health");

    factory.flush()?;
    json.flush()?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
