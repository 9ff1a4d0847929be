use std::cmp::Ordering;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 语音备忘录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceMemo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub duration_secs: f64,
    #[serde(default)]
    pub audio_file: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    pub created_at: DateTime<Local>,
}

impl VoiceMemo {
    pub fn new(title: String, transcript: String, sort_order: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            transcript,
            duration_secs: 0.0,
            audio_file: None,
            sort_order,
            created_at: Local::now(),
        }
    }

    /// 时长，格式为 m:ss
    pub fn duration_label(&self) -> String {
        let total = self.duration_secs.max(0.0) as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }
}

/// 列表排序：sort_order 升序，再按 created_at 降序
pub fn memo_order(a: &VoiceMemo, b: &VoiceMemo) -> Ordering {
    a.sort_order
        .cmp(&b.sort_order)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// 稳定排序
pub fn sort_memos(memos: &mut [VoiceMemo]) {
    memos.sort_by(memo_order);
}

/// TOML文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoStoreData {
    pub meta: StoreMeta,
    #[serde(default)]
    pub memos: Vec<VoiceMemo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMeta {
    pub version: String,
    pub last_modified: DateTime<Local>,
}

impl MemoStoreData {
    pub fn new(memos: Vec<VoiceMemo>) -> Self {
        Self {
            meta: StoreMeta {
                version: "1.0".to_string(),
                last_modified: Local::now(),
            },
            memos,
        }
    }
}

impl Default for MemoStoreData {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
