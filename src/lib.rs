// Public modules
pub mod collector;
pub mod config;
pub mod kubernetes;
pub mod parsing;
pub mod projections;
pub mod report;
pub mod summary;
pub mod types;

// Re-export commonly used items
pub use collector::ResourceCollector;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, MockEnvironment, SystemEnvironment};
pub use kubernetes::check_cluster_reachable;
pub use parsing::{
    ki_to_gi_rounded, millicores_to_cores, parse_cpu_to_millicores, parse_memory_to_bytes,
    parse_memory_to_ki, percentage,
};
pub use projections::{filter_safe_labels, SAFE_LABEL_PREFIXES};
pub use report::{InventoryReport, ReportDocument};
pub use summary::{compute_cluster_summary, compute_coverage_metrics, compute_resource_usage};
pub use types::*;
