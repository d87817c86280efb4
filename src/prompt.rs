use std::io::{self, BufRead, Write};
use tidy_files::Error;

/// Read one trimmed line. `None` on end of input.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub fn prompt_confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    default: Option<bool>,
) -> io::Result<bool> {
    let hint = match default {
        Some(true) => "(Y/n)",
        Some(false) | None => "(y/N)",
    };

    loop {
        let answer = match prompt_line(input, out, &format!("{} {}: ", prompt, hint))? {
            Some(answer) => answer,
            None => return Ok(default.unwrap_or(false)),
        };

        match answer.to_uppercase().as_str() {
            "Y" | "YES" => return Ok(true),
            "N" | "NO" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}

pub fn parse_days(text: &str) -> Result<u64, Error> {
    text.trim()
        .parse::<u64>()
        .map_err(|_| Error::InvalidInput(format!("'{}' is not a whole number of days", text.trim())))
}

/// Keep asking until a non-negative integer is entered. `None` on end of input.
pub fn prompt_days<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<u64>> {
    loop {
        let Some(answer) = prompt_line(input, out, prompt)? else {
            return Ok(None);
        };
        match parse_days(&answer) {
            Ok(days) => return Ok(Some(days)),
            Err(err) => writeln!(out, "{}", err)?,
        }
    }
}
