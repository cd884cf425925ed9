//! Performance and size statistics for a single compress/decompress run.
//!
//! Adapted from the sibling `shared_files::stats` module used by every compression module in the
//! workspace this crate grew out of. The timer types and the builder pattern are carried over
//! unchanged; only the algorithm identifier is generalized from a fixed set of modules to
//! whatever codec the driver happened to invoke.

use std::error::Error;
use std::fmt::{self, Display};
use std::time::{Duration, Instant};

const KIB: usize = 1024;
const MIB: usize = KIB * 1024;
const GIB: usize = MIB * 1024;
const TIB: usize = GIB * 1024;

/// Formats a byte count using binary prefixes (KiB, MiB, GiB, TiB).
pub fn format_bytes(bytes: usize) -> String {
    if bytes >= TIB {
        format!("{:.2} TiB", bytes as f64 / TIB as f64)
    } else if bytes >= GIB {
        format!("{:.2} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.2} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} Bytes")
    }
}

/// Raised by [`CompressionStatsBuilder::build`] when a mandatory field was never set.
#[derive(Debug)]
pub enum BuilderError {
    MissingField(&'static str),
}

impl Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderError::MissingField(field) => {
                write!(f, "Builder Error: Missing required field '{field}'")
            }
        }
    }
}

impl Error for BuilderError {}

/// One named, timed step within a larger operation.
#[derive(Debug, Clone)]
pub struct SectionStats {
    pub name: String,
    pub duration: Duration,
}

impl SectionStats {
    pub fn new(name: &str, duration: Duration) -> Self {
        SectionStats {
            name: name.to_string(),
            duration,
        }
    }
}

impl Display for SectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<30} {:.6} seconds",
            self.name,
            self.duration.as_secs_f64()
        )
    }
}

/// Times a single section of work; consumes itself on [`SubSectionTimer::end`] so a section can't
/// be measured twice by accident.
pub struct SubSectionTimer {
    start_time: Instant,
    section_name: String,
}

impl SubSectionTimer {
    pub fn new(name: &str) -> Self {
        SubSectionTimer {
            start_time: Instant::now(),
            section_name: name.to_string(),
        }
    }

    pub fn end(self) -> SectionStats {
        SectionStats::new(&self.section_name, self.start_time.elapsed())
    }
}

/// The overall timer for one compress/decompress run, collecting whatever sub-section timings
/// were recorded along the way.
pub struct StatsTimer {
    start_time: Instant,
    sections: Vec<SectionStats>,
}

impl StatsTimer {
    pub fn new() -> Self {
        StatsTimer {
            start_time: Instant::now(),
            sections: Vec::new(),
        }
    }

    pub fn start_section(&mut self, name: &str) -> SubSectionTimer {
        SubSectionTimer::new(name)
    }

    pub fn add_section(&mut self, section_stats: SectionStats) {
        self.sections.push(section_stats);
    }

    pub fn end(self) -> (Duration, Vec<SectionStats>) {
        (self.start_time.elapsed(), self.sections)
    }
}

impl Default for StatsTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`StatsTimer`] that's entirely zero-cost when statistics were not requested: every method
/// becomes a no-op rather than branching on a flag at each call site.
pub struct OptionalStatsTimer(Option<StatsTimer>);

impl OptionalStatsTimer {
    pub fn new(enabled: bool) -> Self {
        OptionalStatsTimer(enabled.then(StatsTimer::new))
    }

    pub fn start_section(&mut self, name: &str) -> Option<SubSectionTimer> {
        self.0.as_mut().map(|t| t.start_section(name))
    }

    pub fn add_section(&mut self, timer: Option<SubSectionTimer>) {
        if let (Some(sub_timer), Some(main_t)) = (timer, self.0.as_mut()) {
            main_t.add_section(sub_timer.end());
        }
    }

    pub fn end(self) -> (Duration, Vec<SectionStats>) {
        self.0
            .map_or((Duration::from_secs(0), Vec::new()), |t| t.end())
    }
}

/// Collected metrics for one completed compress or decompress operation.
#[derive(Debug, Clone)]
pub struct CompressionStats {
    pub algorithm_name: &'static str,
    pub original_len: usize,
    pub processed_len: usize,
    pub duration: Duration,
    pub is_compression: bool,
    pub sections: Vec<SectionStats>,
    pub compression_ratio_factor: f64,
    pub speed_mib_s: f64,
    pub raw_byte_difference: i64,
    pub percentage_change: f64,
}

impl CompressionStats {
    fn calculate_stats(
        algorithm_name: &'static str,
        original_len: usize,
        processed_len: usize,
        duration: Duration,
        is_compression: bool,
        sections: Vec<SectionStats>,
    ) -> Self {
        let (uncompressed_len, compressed_len) = if is_compression {
            (original_len, processed_len)
        } else {
            (processed_len, original_len)
        };

        let compression_ratio_factor = if compressed_len == 0 {
            0.0
        } else {
            uncompressed_len as f64 / compressed_len as f64
        };

        let duration_secs = duration.as_secs_f64();
        let speed_mib_s = if duration_secs == 0.0 {
            f64::INFINITY
        } else {
            (uncompressed_len as f64 / (1024.0 * 1024.0)) / duration_secs
        };

        let raw_byte_difference = uncompressed_len as i64 - compressed_len as i64;
        let percentage_base = uncompressed_len as f64;
        let percentage_change = if percentage_base == 0.0 {
            0.0
        } else {
            (raw_byte_difference.unsigned_abs() as f64 / percentage_base) * 100.0
        };

        CompressionStats {
            algorithm_name,
            original_len,
            processed_len,
            duration,
            is_compression,
            sections,
            compression_ratio_factor,
            speed_mib_s,
            raw_byte_difference,
            percentage_change,
        }
    }
}

/// Builder for [`CompressionStats`]; ensures every mandatory field is set before the derived
/// metrics are calculated.
#[derive(Default)]
pub struct CompressionStatsBuilder {
    algorithm_name: Option<&'static str>,
    original_len: Option<usize>,
    processed_len: Option<usize>,
    duration: Option<Duration>,
    is_compression: Option<bool>,
    sections: Vec<SectionStats>,
}

impl CompressionStatsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm_name(mut self, name: &'static str) -> Self {
        self.algorithm_name = Some(name);
        self
    }

    pub fn original_len(mut self, len: usize) -> Self {
        self.original_len = Some(len);
        self
    }

    pub fn processed_len(mut self, len: usize) -> Self {
        self.processed_len = Some(len);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn is_compression(mut self, is_comp: bool) -> Self {
        self.is_compression = Some(is_comp);
        self
    }

    pub fn sections(mut self, sections: Vec<SectionStats>) -> Self {
        self.sections = sections;
        self
    }

    pub fn build(self) -> Result<CompressionStats, BuilderError> {
        let name = self
            .algorithm_name
            .ok_or(BuilderError::MissingField("algorithm_name"))?;
        let original = self
            .original_len
            .ok_or(BuilderError::MissingField("original_len"))?;
        let processed = self
            .processed_len
            .ok_or(BuilderError::MissingField("processed_len"))?;
        let duration = self
            .duration
            .ok_or(BuilderError::MissingField("duration"))?;
        let is_comp = self
            .is_compression
            .ok_or(BuilderError::MissingField("is_compression"))?;

        Ok(CompressionStats::calculate_stats(
            name,
            original,
            processed,
            duration,
            is_comp,
            self.sections,
        ))
    }
}

impl Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (uncompressed_len, compressed_len) = if self.is_compression {
            (self.original_len, self.processed_len)
        } else {
            (self.processed_len, self.original_len)
        };
        let title_name = if self.is_compression {
            "Compression"
        } else {
            "Decompression"
        };
        let speed_name = if self.is_compression {
            "Compression Speed"
        } else {
            "Decompression Speed"
        };
        let raw_byte_difference_abs = self.raw_byte_difference.unsigned_abs() as usize;

        writeln!(f, "--- {title_name} Statistics ---")?;
        writeln!(f, "    Algorithm:            {}", self.algorithm_name)?;
        writeln!(
            f,
            "    Original Size:        {}",
            format_bytes(uncompressed_len)
        )?;
        writeln!(
            f,
            "    Processed Size:       {}",
            format_bytes(compressed_len)
        )?;
        writeln!(
            f,
            "    Bytes Difference:     {} ({})",
            self.raw_byte_difference,
            format_bytes(raw_byte_difference_abs)
        )?;
        writeln!(
            f,
            "    Compression Ratio:    {:.3}:1 (Original / Processed)",
            self.compression_ratio_factor
        )?;
        writeln!(
            f,
            "    Percentage Change:    {:.2}%",
            self.percentage_change
        )?;
        writeln!(
            f,
            "    Processing Time:      {:.3} seconds",
            self.duration.as_secs_f64()
        )?;
        writeln!(f, "    {:<21} {:.2} MiB/s", speed_name, self.speed_mib_s)?;

        if !self.sections.is_empty() {
            writeln!(f, "    --- Detailed Steps ---")?;
            for section in &self.sections {
                writeln!(f, "    - {section}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_picks_largest_unit() {
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1024), "1.00 KiB");
        assert_eq!(format_bytes(3 * GIB), "3.00 GiB");
    }

    #[test]
    fn builder_requires_all_fields() {
        let err = CompressionStatsBuilder::new()
            .algorithm_name("huf")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuilderError::MissingField("original_len")));
    }

    #[test]
    fn builder_computes_ratio() {
        let stats = CompressionStatsBuilder::new()
            .algorithm_name("huf")
            .original_len(100)
            .processed_len(50)
            .duration(Duration::from_secs(1))
            .is_compression(true)
            .build()
            .unwrap();
        assert_eq!(stats.compression_ratio_factor, 2.0);
        assert_eq!(stats.raw_byte_difference, 50);
    }
}
