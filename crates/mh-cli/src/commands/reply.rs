use colored::Colorize;

use mh_prompt::{InterpretError, ReplyKind, respond};

pub fn run(
    text: &str,
    interpretation: &str,
    at: Option<&str>,
    seed: Option<u64>,
    utc_offset: i32,
) -> Result<(), String> {
    let mut diviner = super::build_diviner(at, seed, utc_offset)?;
    let interpreter = |_: &str| -> Result<String, InterpretError> { Ok(interpretation.to_string()) };

    let Some(reply) = respond(&mut diviner, &interpreter, text) else {
        println!("  {}", "Not a divination request.".dimmed());
        return Ok(());
    };

    match reply.kind {
        ReplyKind::Text => {
            println!("{}", reply.content);
            Ok(())
        }
        ReplyKind::Error => Err(reply.content),
    }
}
