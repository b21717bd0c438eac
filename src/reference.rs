//! 사전 계산된 프로젝션 결과 테이블(master.csv).
//!
//! 헤더 이름은 자유 형식이라 정적 스키마가 없다. 각 행은 열 이름 → 원시 값 매핑으로 보관하고,
//! 키 파라미터와의 연결은 `matching::header` 가 담당한다.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::numeric;

/// CSV 셀 값. 빈 셀은 `Null`, 숫자로 읽히면 `Number`, 그 외는 `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Number(f64),
    Text(String),
}

impl RawValue {
    /// CSV 셀 문자열을 동적 타입으로 해석한다.
    pub fn parse_cell(cell: &str) -> Self {
        if cell.trim().is_empty() {
            return RawValue::Null;
        }
        match numeric::parse_str(cell) {
            Some(n) => RawValue::Number(n),
            None => RawValue::Text(cell.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Null => None,
            RawValue::Number(n) => Some(*n).filter(|v| v.is_finite()),
            RawValue::Text(s) => numeric::parse_str(s),
        }
    }

    /// 값이 없거나 공백뿐인지.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Number(_) => false,
            RawValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Null => Ok(()),
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// 결과 테이블의 한 행. 열 순서를 유지한다.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceRow {
    cells: Vec<(String, RawValue)>,
}

impl ReferenceRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 열 값을 넣는다. 같은 이름이 있으면 덮어쓴다.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<RawValue>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<C, V> FromIterator<(C, V)> for ReferenceRow
where
    C: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut row = ReferenceRow::new();
        for (c, v) in iter {
            row.insert(c, v);
        }
        row
    }
}

/// 결과 테이블 로드 시 발생 가능한 오류. 개별 행 오류는 여기에 포함되지 않는다.
#[derive(Debug)]
pub enum ReferenceError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 헤더 행을 읽을 수 없음
    Csv(csv::Error),
}

impl std::fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceError::Io(e) => write!(f, "결과 테이블 파일 오류: {e}"),
            ReferenceError::Csv(e) => write!(f, "결과 테이블 헤더 오류: {e}"),
        }
    }
}

impl std::error::Error for ReferenceError {}

impl From<std::io::Error> for ReferenceError {
    fn from(value: std::io::Error) -> Self {
        ReferenceError::Io(value)
    }
}

impl From<csv::Error> for ReferenceError {
    fn from(value: csv::Error) -> Self {
        ReferenceError::Csv(value)
    }
}

/// CSV 파일에서 결과 테이블을 읽는다.
pub fn load_reference_csv(path: &Path) -> Result<Vec<ReferenceRow>, ReferenceError> {
    let file = File::open(path)?;
    let rows = read_reference_rows(file)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "reference table loaded");
    Ok(rows)
}

/// 헤더가 있는 CSV를 행 목록으로 변환한다.
///
/// 파싱에 실패한 행은 경고 로그만 남기고 건너뛴다. 모든 셀이 빈 행도 제외한다.
pub fn read_reference_rows<R: Read>(reader: R) -> Result<Vec<ReferenceRow>, ReferenceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    tracing::debug!(columns = headers.len(), "reference headers: {:?}", headers);

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(err) => {
                tracing::warn!(record = line + 1, "skipping unreadable reference row: {err}");
                continue;
            }
        };
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: ReferenceRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, cell)| (h.clone(), RawValue::parse_cell(cell)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
