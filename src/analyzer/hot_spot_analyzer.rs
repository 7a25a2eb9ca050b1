use crate::analyzer::base::ClassifiedSequence;
use crate::model::{COLUMN_COUNT, Outcome, Tier};
use serde::Serialize;
use std::fmt::Display;

/// 분 단위 핫스팟을 집계하는 대상 버킷
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum MinuteBucket {
    Low,
    Mid,
    High,
    /// 50x 이상
    Over50,
    /// 100x 이상
    Over100,
    /// 1000x 이상
    Over1000,
}

impl MinuteBucket {
    pub const ALL: [MinuteBucket; 6] = [
        MinuteBucket::Low,
        MinuteBucket::Mid,
        MinuteBucket::High,
        MinuteBucket::Over50,
        MinuteBucket::Over100,
        MinuteBucket::Over1000,
    ];

    /// 결과가 이 버킷에 속하는지 확인
    pub fn contains(&self, outcome: &Outcome) -> bool {
        match self {
            MinuteBucket::Low => outcome.tier() == Tier::Low,
            MinuteBucket::Mid => outcome.tier() == Tier::Mid,
            MinuteBucket::High => outcome.tier() == Tier::High,
            MinuteBucket::Over50 => outcome.value >= 50.0,
            MinuteBucket::Over100 => outcome.value >= 100.0,
            MinuteBucket::Over1000 => outcome.value >= 1000.0,
        }
    }
}

impl Display for MinuteBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MinuteBucket::Low => write!(f, "low"),
            MinuteBucket::Mid => write!(f, "mid"),
            MinuteBucket::High => write!(f, "high"),
            MinuteBucket::Over50 => write!(f, "50x+"),
            MinuteBucket::Over100 => write!(f, "100x+"),
            MinuteBucket::Over1000 => write!(f, "1000x+"),
        }
    }
}

/// 하우스(High 간 간격) 순위 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HouseRank {
    pub house: usize,
    pub count: usize,
}

/// 컬럼 순위 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnRank {
    pub column: usize,
    pub count: usize,
}

/// 분 순위 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HotMinute {
    pub minute: u32,
    pub count: usize,
}

/// 버킷별 핫 미닛 목록
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinuteRanking {
    pub bucket: MinuteBucket,
    pub minutes: Vec<HotMinute>,
}

/// 핫스팟 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotSpots {
    /// 간격 1..=25 발생 횟수 (내림차순)
    pub houses: Vec<HouseRank>,
    /// 2회 이상 발생한 High 컬럼 (내림차순)
    pub columns: Vec<ColumnRank>,
    /// 버킷별 핫 미닛
    pub minutes: Vec<MinuteRanking>,
}

impl HotSpots {
    /// 특정 버킷의 핫 미닛 목록
    pub fn minutes_for(&self, bucket: MinuteBucket) -> &[HotMinute] {
        self.minutes
            .iter()
            .find(|ranking| ranking.bucket == bucket)
            .map(|ranking| ranking.minutes.as_slice())
            .unwrap_or(&[])
    }

    /// 특정 분이 해당 버킷의 핫 미닛인지 확인
    pub fn is_hot_minute(&self, bucket: MinuteBucket, minute: u32) -> bool {
        self.minutes_for(bucket)
            .iter()
            .any(|hot| hot.minute == minute)
    }
}

/// 핫스팟 분석기
#[derive(Debug, Clone)]
pub struct HotSpotAnalyzer {
    house_max: usize,
    minute_top: usize,
}

/// 개수 내림차순, 키 오름차순 정렬
fn sort_by_count<K: Ord + Copy>(entries: &mut [(K, usize)]) {
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
}

impl HotSpotAnalyzer {
    /// 새 핫스팟 분석기 생성
    ///
    /// # Arguments
    /// * `house_max` - 집계할 최대 간격
    /// * `minute_top` - 버킷별로 유지할 핫 미닛 수
    pub fn new(house_max: usize, minute_top: usize) -> Self {
        HotSpotAnalyzer {
            house_max,
            minute_top,
        }
    }

    pub fn analyze(&self, seq: &ClassifiedSequence) -> HotSpots {
        HotSpots {
            houses: self.rank_houses(seq),
            columns: self.rank_columns(seq),
            minutes: MinuteBucket::ALL
                .iter()
                .map(|bucket| MinuteRanking {
                    bucket: *bucket,
                    minutes: self.rank_minutes(seq, *bucket),
                })
                .collect(),
        }
    }

    fn rank_houses(&self, seq: &ClassifiedSequence) -> Vec<HouseRank> {
        let mut counts = vec![0usize; self.house_max + 1];
        for pair in seq.high_indices().windows(2) {
            let interval = pair[1] - pair[0];
            if interval <= self.house_max {
                counts[interval] += 1;
            }
        }

        let mut entries: Vec<(usize, usize)> = counts
            .into_iter()
            .enumerate()
            .skip(1)
            .filter(|(_, count)| *count > 0)
            .collect();
        sort_by_count(&mut entries);
        entries
            .into_iter()
            .map(|(house, count)| HouseRank { house, count })
            .collect()
    }

    fn rank_columns(&self, seq: &ClassifiedSequence) -> Vec<ColumnRank> {
        let mut counts = [0usize; COLUMN_COUNT + 1];
        for &index in seq.high_indices() {
            counts[seq.outcomes()[index].column()] += 1;
        }

        let mut entries: Vec<(usize, usize)> = counts
            .iter()
            .copied()
            .enumerate()
            .skip(1)
            .filter(|(_, count)| *count > 1)
            .collect();
        sort_by_count(&mut entries);
        entries
            .into_iter()
            .map(|(column, count)| ColumnRank { column, count })
            .collect()
    }

    fn rank_minutes(&self, seq: &ClassifiedSequence, bucket: MinuteBucket) -> Vec<HotMinute> {
        let mut counts = [0usize; 60];
        for outcome in seq.outcomes().iter().filter(|o| bucket.contains(o)) {
            counts[outcome.minute() as usize] += 1;
        }

        // 한 번만 나온 분은 우연으로 보고 제외
        let mut entries: Vec<(u32, usize)> = counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 1)
            .map(|(minute, count)| (minute as u32, *count))
            .collect();
        sort_by_count(&mut entries);
        entries.truncate(self.minute_top);
        entries
            .into_iter()
            .map(|(minute, count)| HotMinute { minute, count })
            .collect()
    }
}
