pub mod spam_sweep;
