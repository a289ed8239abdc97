//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Format a date using a date-fns compatible format string
///
/// Supported tokens: `yyyy`/`yy`, `M`..`MMMM` (and standalone `L`..`LLLL`),
/// `d`/`dd`, `E`..`EEEE`, `H`/`HH`, `h`/`hh`, `m`/`mm`, `s`/`ss`, `a`.
/// Text between single quotes is copied verbatim; `''` is a literal quote.
///
/// # Examples
/// ```ignore
/// format_date(&date, "dd LLL yyyy", "pt-BR") // -> "15 mar 2021"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str, language: &str) -> String {
    let names = LocaleNames::for_language(language);
    let mut out = String::with_capacity(format.len() + 8);
    let chars: Vec<char> = format.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() && chars[i] != '\'' {
                out.push(chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            out.push(c);
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        out.push_str(&render_token(date, c, run, &names));
        i += run;
    }

    out
}

fn render_token<Tz: TimeZone>(
    date: &DateTime<Tz>,
    token: char,
    run: usize,
    names: &LocaleNames,
) -> String {
    let month = date.month0() as usize;
    let weekday = date.weekday().num_days_from_sunday() as usize;

    match (token, run) {
        ('y', 2) => format!("{:02}", date.year() % 100),
        ('y', _) => format!("{:0width$}", date.year(), width = run),
        ('M' | 'L', 1) => date.month().to_string(),
        ('M' | 'L', 2) => format!("{:02}", date.month()),
        ('M' | 'L', 3) => names.months_short[month].to_string(),
        ('M' | 'L', _) => names.months[month].to_string(),
        ('d', 1) => date.day().to_string(),
        ('d', _) => format!("{:02}", date.day()),
        ('E', 4) => names.weekdays[weekday].to_string(),
        ('E', _) => names.weekdays_short[weekday].to_string(),
        ('H', 1) => date.hour().to_string(),
        ('H', _) => format!("{:02}", date.hour()),
        ('h', 1) => date.hour12().1.to_string(),
        ('h', _) => format!("{:02}", date.hour12().1),
        ('m', 1) => date.minute().to_string(),
        ('m', _) => format!("{:02}", date.minute()),
        ('s', 1) => date.second().to_string(),
        ('s', _) => format!("{:02}", date.second()),
        ('a', _) => (if date.hour12().0 { "PM" } else { "AM" }).to_string(),
        (other, n) => other.to_string().repeat(n),
    }
}

/// Month and weekday names for a language
struct LocaleNames {
    months: [&'static str; 12],
    months_short: [&'static str; 12],
    weekdays: [&'static str; 7],
    weekdays_short: [&'static str; 7],
}

impl LocaleNames {
    fn for_language(language: &str) -> Self {
        let lang = language.split(['-', '_']).next().unwrap_or_default();
        if lang.eq_ignore_ascii_case("pt") {
            Self {
                months: [
                    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho",
                    "agosto", "setembro", "outubro", "novembro", "dezembro",
                ],
                months_short: [
                    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov",
                    "dez",
                ],
                weekdays: [
                    "domingo", "segunda-feira", "terça-feira", "quarta-feira", "quinta-feira",
                    "sexta-feira", "sábado",
                ],
                weekdays_short: ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"],
            }
        } else {
            Self {
                months: [
                    "January", "February", "March", "April", "May", "June", "July", "August",
                    "September", "October", "November", "December",
                ],
                months_short: [
                    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                    "Dec",
                ],
                weekdays: [
                    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
                ],
                weekdays_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            }
        }
    }
}

/// Format a date in ISO 8601 for `datetime` attributes
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
