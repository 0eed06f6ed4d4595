pub mod review;

pub use review::{
    apply_cli_overrides, load_config, resolve_repository_dir, run_review, run_review_impl,
};
