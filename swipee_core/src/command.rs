//! Command line grammar: `swipee [<source>] <command> <x1> <y1> <x2> <y2> <step>`.

use crate::error::ParseError;
use crate::request::{GestureRequest, SwipeMode};
use crate::sample::Point;
use crate::source::InputSource;
use crate::trajectory::DistanceMetric;

const NUMERIC_ARGS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Invocation {
    /// Nothing to do but show the usage text.
    Usage,
    Swipe(GestureRequest),
}

/// Parses the positional arguments of one invocation.
///
/// A leading token naming a source selects it; anything else is taken as the
/// command, so an unknown source surfaces as an unknown command.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation, ParseError> {
    let Some(first) = args.first().map(AsRef::as_ref) else {
        return Ok(Invocation::Usage);
    };

    let (source, rest) = match InputSource::from_name(first) {
        Some(source) => (Some(source), &args[1..]),
        None => (None, args),
    };

    let Some(command) = rest.first().map(AsRef::as_ref) else {
        return Err(ParseError::InvalidArguments {
            command: first.to_string(),
            reason: "missing command".to_string(),
        });
    };
    let mode = SwipeMode::from_command(command)
        .ok_or_else(|| ParseError::UnknownCommand(command.to_string()))?;

    let invalid = |reason: String| ParseError::InvalidArguments {
        command: command.to_string(),
        reason,
    };

    let numbers = &rest[1..];
    if numbers.len() != NUMERIC_ARGS {
        return Err(invalid(format!(
            "expected {NUMERIC_ARGS} numbers <x1> <y1> <x2> <y2> <step>, got {}",
            numbers.len()
        )));
    }

    let mut values = [0.0f32; NUMERIC_ARGS];
    for (value, token) in values.iter_mut().zip(numbers) {
        let token = token.as_ref();
        *value = token
            .parse::<f32>()
            .map_err(|_| invalid(format!("'{token}' is not a number")))?;
        if !value.is_finite() {
            return Err(invalid(format!("'{token}' is not a finite number")));
        }
    }

    let [x1, y1, x2, y2, step] = values;
    if step <= 0.0 {
        return Err(invalid(format!("step must be positive, got {step}")));
    }

    let start = Point::new(x1, y1);
    let end = Point::new(x2, y2);
    if !(x2 - x1).is_finite() || !(y2 - y1).is_finite() {
        return Err(invalid("coordinates are too far apart".to_string()));
    }
    for metric in [DistanceMetric::Observed, DistanceMetric::Euclidean] {
        let distance = metric.distance(start, end);
        if !distance.is_finite() || !(distance / step).is_finite() {
            return Err(invalid(format!("{metric} distance overflows with step {step}")));
        }
    }

    Ok(Invocation::Swipe(GestureRequest {
        source: source.unwrap_or_default(),
        mode,
        start,
        end,
        step,
    }))
}

/// Usage text listing every command and source.
pub fn usage() -> String {
    let default_source = InputSource::default();
    let mut text = String::from("Usage: swipee [<source>] <command> [<arg>...]\n\n");
    text.push_str("The commands and default sources are:\n");
    for mode in SwipeMode::ALL {
        text.push_str(&format!(
            "\t{:<5} <x1> <y1> <x2> <y2> <step(pixels)> (Default: {default_source})\n",
            mode.command()
        ));
        text.push_str(&format!("\t\t{}\n", mode.summary()));
    }
    text.push_str("\nThe sources are: \n");
    for source in InputSource::ALL {
        text.push_str(&format!("      {source}\n"));
    }
    text
}
