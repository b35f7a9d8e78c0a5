pub mod stage1_score;
pub mod stage2_present;
pub mod stage3_report;
