//! 실시간 네임스페이스
//!
//! 리소스 종류마다 독립된 브로드캐스트 채널이 하나씩 있습니다.
//! `/instructors`는 사용자 컬렉션 중 강사만 다루는 별도 채널입니다.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Root,
    Users,
    Activities,
    Events,
    Guides,
    Notifications,
    Instructors,
}

impl Namespace {
    pub const ALL: [Namespace; 7] = [
        Namespace::Root,
        Namespace::Users,
        Namespace::Activities,
        Namespace::Events,
        Namespace::Guides,
        Namespace::Notifications,
        Namespace::Instructors,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Namespace::Root => "/",
            Namespace::Users => "/users",
            Namespace::Activities => "/activities",
            Namespace::Events => "/events",
            Namespace::Guides => "/guides",
            Namespace::Notifications => "/notifications",
            Namespace::Instructors => "/instructors",
        }
    }

    /// `/ws/{segment}`의 경로 조각을 해석합니다. 빈 문자열은 루트입니다.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment.trim_matches('/') {
            "" => Some(Namespace::Root),
            "users" => Some(Namespace::Users),
            "activities" => Some(Namespace::Activities),
            "events" => Some(Namespace::Events),
            "guides" => Some(Namespace::Guides),
            "notifications" => Some(Namespace::Notifications),
            "instructors" => Some(Namespace::Instructors),
            _ => None,
        }
    }

    /// 델타 이벤트 이름의 접두어 (`user-created`의 `user`)
    pub fn resource(&self) -> Option<&'static str> {
        match self {
            Namespace::Root => None,
            Namespace::Users | Namespace::Instructors => Some("user"),
            Namespace::Activities => Some("activity"),
            Namespace::Events => Some("event"),
            Namespace::Guides => Some("guide"),
            Namespace::Notifications => Some("notification"),
        }
    }

    /// 전체 목록 이벤트 이름
    pub fn snapshot_event(&self) -> Option<&'static str> {
        match self {
            Namespace::Root => None,
            Namespace::Users => Some("users-updated"),
            Namespace::Activities => Some("activities-updated"),
            Namespace::Events => Some("events-updated"),
            Namespace::Guides => Some("guides-updated"),
            Namespace::Notifications => Some("notifications-updated"),
            Namespace::Instructors => Some("instructors-updated"),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
