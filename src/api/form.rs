//! Interactive Questionnaire - input collection boundary
//!
//! Seven questions, answered by option number or label. Every answer is
//! domain-validated before a RawSelection exists; an out-of-domain answer
//! re-prompts without losing earlier answers. Reads from any `BufRead` and
//! writes to any `Write` so tests can drive it with in-memory streams.

use std::io::{self, BufRead, Write};

use crate::logic::features::{
    parse_yes_no, AreaType, InvalidDomainValue, RawSelection, RoadSurface, SpeedLimitBand,
    WeatherCondition,
};

/// Collect one full set of answers. Returns `None` on end of input.
pub fn collect_selection<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<RawSelection>> {
    let Some(area_type) = ask_choice(
        input,
        output,
        "Select the area type:",
        AreaType::LABELS,
        AreaType::parse,
    )?
    else {
        return Ok(None);
    };

    let Some(is_weekend) = ask_yes_no(input, output, "Is it a weekend?", "is_weekend")? else {
        return Ok(None);
    };

    let Some(is_peak_hour) = ask_yes_no(input, output, "Is it peak hour?", "is_peak_hour")? else {
        return Ok(None);
    };

    let Some(road_surface) = ask_choice(
        input,
        output,
        "Select the road surface condition:",
        RoadSurface::LABELS,
        RoadSurface::parse,
    )?
    else {
        return Ok(None);
    };

    let Some(weather) = ask_choice(
        input,
        output,
        "Select the weather condition:",
        WeatherCondition::LABELS,
        WeatherCondition::parse,
    )?
    else {
        return Ok(None);
    };

    let Some(poor_visibility) = ask_yes_no(
        input,
        output,
        "Poor visibility (light condition)?",
        "poor_visibility",
    )?
    else {
        return Ok(None);
    };

    let Some(speed_limit_band) = ask_choice(
        input,
        output,
        "Select the speed limit group:",
        SpeedLimitBand::LABELS,
        SpeedLimitBand::parse,
    )?
    else {
        return Ok(None);
    };

    Ok(Some(RawSelection {
        area_type,
        is_weekend,
        is_peak_hour,
        road_surface,
        weather,
        poor_visibility,
        speed_limit_band,
    }))
}

/// Radio-style question. Empty input takes the first option (the default),
/// answers are accepted as `1..=n` or as a label. Returns `None` on EOF.
fn ask_choice<R, W, T>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    options: &'static [&'static str],
    parse: impl Fn(&str) -> Result<T, InvalidDomainValue>,
) -> io::Result<Option<T>>
where
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(output, "{}", prompt)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(output, "  {}) {}", i + 1, option)?;
        }
        write!(output, "[{}]> ", options[0])?;
        output.flush()?;

        let Some(line) = read_answer(input)? else {
            return Ok(None);
        };

        let answer = if line.is_empty() {
            options[0]
        } else if let Ok(number) = line.parse::<usize>() {
            match number.checked_sub(1).and_then(|i| options.get(i).copied()) {
                Some(option) => option,
                None => {
                    writeln!(output, "  Please pick a number between 1 and {}", options.len())?;
                    continue;
                }
            }
        } else {
            line.as_str()
        };

        match parse(answer) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(output, "  {}", e)?,
        }
    }
}

/// Checkbox-style question; default is "no". Returns `None` on EOF.
fn ask_yes_no<R, W>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    field: &'static str,
) -> io::Result<Option<bool>>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{} [y/N]> ", prompt)?;
        output.flush()?;

        let Some(line) = read_answer(input)? else {
            return Ok(None);
        };

        if line.is_empty() {
            return Ok(Some(false));
        }

        match parse_yes_no(field, &line) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(output, "  {}", e)?,
        }
    }
}

/// One trimmed line of input; `None` on EOF
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
