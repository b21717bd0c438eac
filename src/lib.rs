//! RO 멤브레인 프로젝션 워크시트의 핵심 로직.
//!
//! 입력 파라미터에서 계산 필드를 유도하는 파생 엔진과, 완성된 입력으로 사전 계산된
//! 프로젝션 결과 테이블을 검색하는 레코드 매처로 이루어진다. 화면(폼 호스트)은 이 라이브러리를
//! 호출만 하고 계산 규칙은 갖지 않는다.

pub mod app;
pub mod config;
pub mod derivation;
pub mod i18n;
pub mod matching;
pub mod numeric;
pub mod params;
pub mod reference;
pub mod session;
pub mod ui_cli;
pub mod units;
