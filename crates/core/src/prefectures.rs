//! Prefecture reference data and per-prefecture statistics.
//!
//! The 47 prefectures are grouped by the hiragana initial of their reading,
//! which is how the dashboard's prefecture index organizes them.

use serde::{Deserialize, Serialize};

/// Prefecture names keyed by hiragana group, in display order.
pub const HIRAGANA_GROUPS: &[(&str, &[&str])] = &[
    (
        "あ",
        &[
            "愛知県",
            "青森県",
            "秋田県",
            "石川県",
            "茨城県",
            "岩手県",
            "愛媛県",
            "大阪府",
            "岡山県",
            "沖縄県",
        ],
    ),
    (
        "か",
        &[
            "香川県",
            "鹿児島県",
            "神奈川県",
            "岐阜県",
            "京都府",
            "熊本県",
            "群馬県",
            "高知県",
        ],
    ),
    ("さ", &["埼玉県", "佐賀県", "滋賀県", "静岡県", "島根県"]),
    ("た", &["千葉県", "東京都", "栃木県", "鳥取県", "富山県", "徳島県"]),
    ("な", &["長崎県", "長野県", "奈良県", "新潟県"]),
    ("は", &["北海道", "兵庫県", "広島県", "福井県", "福岡県", "福島県"]),
    ("ま", &["三重県", "宮城県", "宮崎県"]),
    ("や", &["山形県", "山口県", "山梨県"]),
    ("わ", &["和歌山県"]),
];

/// Statistics for a single prefecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefectureStats {
    pub prefecture: String,
    pub spot_count: i64,
    pub goshuin_count: i64,
}

/// Per-prefecture statistics with overall totals, as served by the
/// backend's stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefectureStatsResponse {
    pub by_prefecture: Vec<PrefectureStats>,
    pub total_prefectures: i64,
    pub total_spots: i64,
    pub total_goshuin: i64,
}

/// Statistics for one hiragana group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedPrefectureStats {
    pub group: &'static str,
    pub prefectures: Vec<PrefectureStats>,
}

/// The hiragana group a prefecture belongs to, or `None` for names that
/// are not one of the 47 prefectures.
pub fn prefecture_group(prefecture: &str) -> Option<&'static str> {
    HIRAGANA_GROUPS
        .iter()
        .find(|(_, members)| members.contains(&prefecture))
        .map(|(group, _)| *group)
}

pub fn is_known_prefecture(prefecture: &str) -> bool {
    prefecture_group(prefecture).is_some()
}

/// Group statistics by hiragana. Every group is present, in canonical
/// order, so the index view renders empty groups too; unknown prefecture
/// names are dropped.
pub fn group_by_hiragana(stats: &[PrefectureStats]) -> Vec<GroupedPrefectureStats> {
    HIRAGANA_GROUPS
        .iter()
        .map(|(group, members)| GroupedPrefectureStats {
            group,
            prefectures: stats
                .iter()
                .filter(|entry| members.contains(&entry.prefecture.as_str()))
                .cloned()
                .collect(),
        })
        .collect()
}
