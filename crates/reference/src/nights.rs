//! Per-site night calendars: allowed nights and lights-off nights.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use nox_calendar::SurveyTime;

use crate::error::ReferenceError;
use crate::sun::SunTable;

/// Short site codes used in the handwritten lights-off log. Two lamp
/// clusters each span two numeric sites.
const SITE_CODES: &[(&str, &[u32])] = &[
    ("lbh", &[1]),
    ("vst", &[2]),
    ("rko", &[3]),
    ("ask", &[4, 5]),
    ("kla", &[6, 7]),
    ("hkv", &[8]),
];

/// Hour of day at which a lights-off date is anchored before night
/// resolution. Any instant inside the night works; 23:00 is safely after
/// every noon boundary of the same date.
const LIGHTS_OFF_ANCHOR_HOUR: u32 = 23;

/// The two per-site night calendars: nights with complete detector coverage
/// (allowed) and nights the experimental lighting was switched off.
///
/// A record is analysable only when its night is allowed for its site and
/// not in the site's lights-off set; the lights-off exclusion wins even for
/// allowed nights.
#[derive(Debug, Clone, Default)]
pub struct NightCalendar {
    allowed: BTreeMap<u32, BTreeSet<usize>>,
    lights_off: BTreeMap<u32, BTreeSet<usize>>,
}

impl NightCalendar {
    /// Loads both calendars.
    ///
    /// `allowed_path` holds `site,night` integer pairs. `lights_path` is the
    /// free-text lamp log (`MM/DD/YYYY,code,on|off,remark`); only `off` rows
    /// are material, each anchored at 23:00:00 of its date and resolved to a
    /// night index against `sun`, then recorded for every numeric site its
    /// code maps to.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] on I/O failure, malformed rows, unknown
    /// site codes, or lights-off dates outside the sun table.
    pub fn from_paths(
        allowed_path: &Path,
        lights_path: &Path,
        sun: &SunTable,
    ) -> Result<Self, ReferenceError> {
        let allowed = parse_allowed(open(allowed_path)?, allowed_path)?;
        let lights_off = parse_lights_off(open(lights_path)?, lights_path, sun)?;
        let calendar = Self {
            allowed,
            lights_off,
        };
        debug!(
            n_sites_allowed = calendar.allowed.len(),
            n_sites_lights_off = calendar.lights_off.len(),
            "night calendars loaded"
        );
        Ok(calendar)
    }

    pub(crate) fn from_parts(
        allowed: BTreeMap<u32, BTreeSet<usize>>,
        lights_off: BTreeMap<u32, BTreeSet<usize>>,
    ) -> Self {
        Self {
            allowed,
            lights_off,
        }
    }

    /// Whether `night` has complete detector coverage at `site`.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::UnknownSite`] if the site has no
    /// allowed-nights entry at all; that is a reference mismatch, not an
    /// empty calendar.
    pub fn is_allowed(&self, site: u32, night: usize) -> Result<bool, ReferenceError> {
        self.allowed
            .get(&site)
            .map(|nights| nights.contains(&night))
            .ok_or(ReferenceError::UnknownSite {
                site,
                calendar: "allowed-nights",
            })
    }

    /// Whether the experimental lighting was off at `site` during `night`.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::UnknownSite`] if the site has no
    /// lights-off entry.
    pub fn is_lights_off(&self, site: u32, night: usize) -> Result<bool, ReferenceError> {
        self.lights_off
            .get(&site)
            .map(|nights| nights.contains(&night))
            .ok_or(ReferenceError::UnknownSite {
                site,
                calendar: "lights-off",
            })
    }
}

fn open(path: &Path) -> Result<BufReader<File>, ReferenceError> {
    let file = File::open(path).map_err(|source| ReferenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(crate) fn parse_allowed<R: BufRead>(
    reader: R,
    path: &Path,
) -> Result<BTreeMap<u32, BTreeSet<usize>>, ReferenceError> {
    let mut allowed: BTreeMap<u32, BTreeSet<usize>> = BTreeMap::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let row = idx + 1;
        let mut fields = line.split(',');
        let site = next_int(&mut fields, "site", path, row)?;
        let night = next_int(&mut fields, "night", path, row)? as usize;
        allowed.entry(site as u32).or_default().insert(night);
    }
    Ok(allowed)
}

pub(crate) fn parse_lights_off<R: BufRead>(
    reader: R,
    path: &Path,
    sun: &SunTable,
) -> Result<BTreeMap<u32, BTreeSet<usize>>, ReferenceError> {
    let mut lights_off: BTreeMap<u32, BTreeSet<usize>> = BTreeMap::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let row = idx + 1;
        // date,code,on|off,remark — the remark may itself contain commas.
        let fields: Vec<&str> = line.trim_end().splitn(4, ',').collect();
        if fields.len() < 4 {
            return Err(ReferenceError::MalformedRow {
                path: path.to_path_buf(),
                line: row,
                details: format!("expected date,code,on|off,remark, got {line:?}"),
            });
        }
        if fields[2] != "off" {
            continue;
        }

        let mut date = fields[0].split('/');
        let month = next_int(&mut date, "month", path, row)? as u32;
        let day = next_int(&mut date, "day", path, row)? as u32;
        let year = next_int(&mut date, "year", path, row)? as i32;
        let anchor = SurveyTime::new(year, month, day, LIGHTS_OFF_ANCHOR_HOUR, 0, 0)?;
        let night = sun.resolve_night(anchor.epoch_seconds())?;

        let code = fields[1];
        let sites = SITE_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, sites)| *sites)
            .ok_or_else(|| ReferenceError::UnknownSiteCode {
                path: path.to_path_buf(),
                line: row,
                code: code.to_string(),
            })?;
        for &site in sites {
            lights_off.entry(site).or_default().insert(night);
        }
    }
    Ok(lights_off)
}

fn next_int<'a, I: Iterator<Item = &'a str>>(
    fields: &mut I,
    name: &str,
    path: &Path,
    line: usize,
) -> Result<i64, ReferenceError> {
    let field = fields
        .next()
        .ok_or_else(|| ReferenceError::MalformedRow {
            path: path.to_path_buf(),
            line,
            details: format!("missing {name} field"),
        })?;
    field
        .trim()
        .parse()
        .map_err(|_| ReferenceError::MalformedRow {
            path: path.to_path_buf(),
            line,
            details: format!("{name} is not an integer: {field:?}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn allowed_pairs_grouped_by_site() {
        let data = "1,100\n1,101\n2,100\n";
        let allowed = parse_allowed(Cursor::new(data), Path::new("allowed.csv")).unwrap();
        assert_eq!(allowed[&1], BTreeSet::from([100, 101]));
        assert_eq!(allowed[&2], BTreeSet::from([100]));
    }

    #[test]
    fn allowed_extra_fields_tolerated() {
        // Only the first two fields are material.
        let allowed =
            parse_allowed(Cursor::new("3,7,comment\n"), Path::new("allowed.csv")).unwrap();
        assert_eq!(allowed[&3], BTreeSet::from([7]));
    }

    #[test]
    fn lights_off_only_off_rows() {
        // Nights bounded at noon epochs 60 days apart; anchor 23:00 of the
        // table's first date lands in night 1.
        let sun = noon_table();
        let data = "\
5/1/2012,lbh,off,generator failure\n\
5/1/2012,vst,on,back on after repair\n";
        let off = parse_lights_off(Cursor::new(data), Path::new("log.csv"), &sun).unwrap();
        assert_eq!(off.len(), 1);
        assert!(off[&1].len() == 1);
    }

    #[test]
    fn lights_off_cluster_codes_fan_out() {
        let sun = noon_table();
        let data = "5/1/2012,ask,off,maintenance\n";
        let off = parse_lights_off(Cursor::new(data), Path::new("log.csv"), &sun).unwrap();
        assert!(off.contains_key(&4) && off.contains_key(&5));
        assert_eq!(off[&4], off[&5]);
    }

    #[test]
    fn lights_off_remark_commas_tolerated() {
        let sun = noon_table();
        let data = "5/1/2012,rko,off,storm, power out, fixed next day\n";
        let off = parse_lights_off(Cursor::new(data), Path::new("log.csv"), &sun).unwrap();
        assert!(off.contains_key(&3));
    }

    #[test]
    fn lights_off_unknown_code_fatal() {
        let sun = noon_table();
        let err = parse_lights_off(
            Cursor::new("5/1/2012,zzz,off,?\n"),
            Path::new("log.csv"),
            &sun,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::UnknownSiteCode { line: 1, .. }
        ));
    }

    #[test]
    fn calendar_lookups() {
        let calendar = NightCalendar::from_parts(
            BTreeMap::from([(1, BTreeSet::from([5, 6]))]),
            BTreeMap::from([(1, BTreeSet::from([6]))]),
        );
        assert!(calendar.is_allowed(1, 5).unwrap());
        assert!(!calendar.is_allowed(1, 7).unwrap());
        assert!(calendar.is_lights_off(1, 6).unwrap());
        assert!(!calendar.is_lights_off(1, 5).unwrap());
    }

    #[test]
    fn unknown_site_is_fatal_in_both_calendars() {
        let calendar = NightCalendar::from_parts(BTreeMap::new(), BTreeMap::new());
        assert!(matches!(
            calendar.is_allowed(9, 0).unwrap_err(),
            ReferenceError::UnknownSite {
                site: 9,
                calendar: "allowed-nights",
            }
        ));
        assert!(matches!(
            calendar.is_lights_off(9, 0).unwrap_err(),
            ReferenceError::UnknownSite {
                site: 9,
                calendar: "lights-off",
            }
        ));
    }

    /// Nights around 2012-05-01: noon of April 30, May 1, and May 2.
    fn noon_table() -> SunTable {
        let noons = [(4, 30), (5, 1), (5, 2)]
            .into_iter()
            .map(|(m, d)| {
                SurveyTime::new(2012, m, d, 12, 0, 0)
                    .unwrap()
                    .epoch_seconds()
            })
            .collect();
        SunTable::from_noons(noons).unwrap()
    }
}
