//! Parallel batch processing using Rayon
//!
//! Computes one subnet report per input line with:
//! - Configurable thread pool
//! - Individual error handling per line
//! - Results kept in input order
//! - Progress reporting through tracing

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use ipcalc_cidr::{Cidr, SubnetReport};

/// Outcome for a single input line
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub input: String,
    pub report: Option<SubnetReport>,
    pub error: Option<String>,
}

impl BatchResult {
    fn compute(input: String) -> Self {
        match Cidr::parse(&input) {
            Ok(cidr) => Self {
                report: Some(SubnetReport::from_cidr(&cidr)),
                input,
                error: None,
            },
            Err(e) => Self {
                input,
                report: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.report.is_some()
    }
}

/// Batch processor with parallel execution
pub struct BatchProcessor {
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    /// Create a new batch processor
    ///
    /// # Arguments
    ///
    /// * `num_threads` - Number of threads (default: CPU cores)
    pub fn new(num_threads: Option<usize>) -> Result<Self> {
        let num_threads = num_threads.unwrap_or_else(num_cpus::get).max(1);

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        Ok(Self { thread_pool })
    }

    /// Compute every input in parallel, preserving input order
    pub fn process(&self, inputs: Vec<String>) -> Vec<BatchResult> {
        let total = inputs.len();
        let processed = AtomicUsize::new(0);

        self.thread_pool.install(|| {
            inputs
                .into_par_iter()
                .map(|input| {
                    let result = BatchResult::compute(input);

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 1000 == 0 || count == total {
                        debug!(processed = count, total, "batch progress");
                    }

                    result
                })
                .collect()
        })
    }

    /// Get thread pool info
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

/// Open the batch source; `None` or `-` reads stdin
pub fn open_input(file: Option<&str>) -> Result<Box<dyn BufRead>> {
    match file {
        None | Some("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Collect CIDR lines, skipping blanks and `#` comments
pub fn read_inputs<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        inputs.push(trimmed.to_string());
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_processor_creation() {
        let processor = BatchProcessor::new(Some(4));
        assert!(processor.is_ok());
        assert_eq!(processor.unwrap().thread_count(), 4);
    }

    #[test]
    fn test_batch_processor_default_threads() {
        let processor = BatchProcessor::new(None).unwrap();
        assert!(processor.thread_count() > 0);
    }

    #[test]
    fn test_process_preserves_order_and_errors() {
        let processor = BatchProcessor::new(Some(2)).unwrap();
        let inputs = vec![
            "192.168.1.1/24".to_string(),
            "300.1.1.1/24".to_string(),
            "8.8.8.8/32".to_string(),
        ];

        let results = processor.process(inputs);
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].input, "192.168.1.1/24");
        assert!(results[0].is_ok());
        assert_eq!(
            results[0].report.as_ref().map(|r| r.network.as_str()),
            Some("192.168.1.0")
        );

        assert!(!results[1].is_ok());
        assert!(results[1]
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Invalid input")));

        assert_eq!(results[2].input, "8.8.8.8/32");
        assert_eq!(results[2].report.as_ref().map(|r| r.host_count), Some(0));
    }

    #[test]
    fn test_read_inputs_skips_blank_and_comments() {
        let data = "# uplinks\n10.0.0.1/30\n\n   \n  192.168.0.7/16  \n#172.16.0.1/12\n";
        let inputs = read_inputs(data.as_bytes()).unwrap();
        assert_eq!(inputs, vec!["10.0.0.1/30", "192.168.0.7/16"]);
    }

    #[test]
    fn test_open_missing_file() {
        assert!(open_input(Some("/nonexistent/ipcalc/inputs.txt")).is_err());
    }
}
