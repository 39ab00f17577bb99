// core/src/navn.rs
use std::io::{BufRead, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::NavnError;

/// Leser lagret NAVN. Manglende eller uleselig fil => tom streng.
pub fn read_cached_navn(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents.trim().to_string(),
        Err(e) => {
            debug!("ingen NAVN-cache på {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Lagrer NAVN til disk; oppretter katalogen ved behov.
pub fn write_cached_navn(path: &Path, value: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, value)?;
    info!("✅ NAVN lagret til {}", path.display());
    Ok(())
}

/// "3" eller "3." -> indeks 2 i forslagslisten.
fn numeric_choice(answer: &str) -> Option<usize> {
    let selection = answer.trim_end_matches('.');
    if !selection.is_empty() && selection.chars().all(|c| c.is_ascii_digit()) {
        selection.parse::<usize>().ok()
    } else {
        None
    }
}

/// Returnerer cachet NAVN, ellers spør brukeren (tall velger et forslag).
///
/// `suggest` kalles bare når det faktisk må spørres.
pub fn load_or_prompt_navn<R, W, F>(
    cache_path: &Path,
    input: &mut R,
    output: &mut W,
    suggest: F,
) -> Result<String, NavnError>
where
    R: BufRead,
    W: Write,
    F: FnOnce() -> Vec<String>,
{
    let cached = read_cached_navn(cache_path);
    if !cached.is_empty() {
        info!("📂 NAVN lastet fra {}", cache_path.display());
        return Ok(cached);
    }

    let options = suggest();
    if options.is_empty() {
        writeln!(output, "Fant ingen forslag fra Utøvere-fanen. Skriv inn navnet manuelt.")?;
    } else {
        writeln!(output, "Velg NAVN fra Utøvere-listen (skriv tallet eller et eget navn):")?;
        for (idx, option) in options.iter().enumerate() {
            writeln!(output, "{}. {}", idx + 1, option)?;
        }
        writeln!(output, "Skriv f.eks. 3. for å velge navn nummer 3, eller skriv inn et annet navn.")?;
    }
    write!(output, "NAVN: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Err(NavnError::Empty);
    }

    let navn = match numeric_choice(answer) {
        Some(n) if !options.is_empty() => match n.checked_sub(1).and_then(|i| options.get(i)) {
            Some(choice) => choice.clone(),
            None => return Err(NavnError::InvalidChoice { max: options.len() }),
        },
        _ => answer.to_string(),
    };

    write_cached_navn(cache_path, &navn)?;
    Ok(navn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_choice_accepts_trailing_dot() {
        assert_eq!(numeric_choice("3."), Some(3));
        assert_eq!(numeric_choice("12"), Some(12));
        assert_eq!(numeric_choice("Ola"), None);
        assert_eq!(numeric_choice("."), None);
    }
}
