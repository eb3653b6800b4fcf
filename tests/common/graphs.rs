use std::path::PathBuf;

// ============================================================================
// Fixture graph: tests/fixtures/commons_graph.txt
// ============================================================================

pub const SETTINGS: &str = "1cd42f6bd1854388597fcb8cb8f67f81a21b4d5e000ad22515c04516bd864136";
pub const MAIN_FEED: &str = "785379e74faa49da390a33889e3a4063213cbd4d76561a0ef4c7bd043a6882bf";
pub const LOGIN: &str = "7e10cbde6deacfc849af238a234f5ff08d74475bd6fc51e5c8b2ef9712193680";
pub const PERMISSION_DIALOG: &str = "8bd661836630cfd0eabef1e4c745a9f78fff05b142eb1f0f224a609b095a1d94";
pub const LAUNCHER: &str = "8d8e5af6737b2a6f395a8f1b7cb7868f48e1a298a059ecd7d40f713f4b875b0f";
pub const MEDIA_DETAILS: &str = "c81485980987e79040caf40ccb7580f32483cdde8135dd6e6831035e9c261f48";
pub const UPLOAD: &str = "ff690e90491c26fda3991d87085489fa7da2dd4c80de79d56e5ce74e88b77ecf";

pub const ALLOW_PERMISSION: &str = "e020b43249c297ccfffd3ba51a767faa57c9953d3dd2b75c8052d51bfb0c8495";
pub const OPEN_MEDIA: &str = "5edbc3e2cd6d6c2dada8430d451ce28b5d83bd012c7c79cc58296d392f1a5b51";
pub const BACK_TO_FEED: &str = "7cc53f5370c0079265527f4fd58ceb12d8056a2495157118fb87353f29cc7de9";
pub const OPEN_UPLOAD: &str = "63c8fc41f5c7ab9642a6d6c84f5bddb5c123ce400cf70e5886ddeb683fa90c87";
pub const OPEN_SETTINGS: &str = "0179dd15be03b52e58bfdbacc92f6b6ceda149f13c853a45ab0575c1db18b195";
pub const SWIPE_TO_LAUNCHER: &str = "1f5c7168e11117e31de4c6565e2207f118ac87e5cbd9a1605cc246b41d19ca2b";

/// Projection of the fixture, one entry per transition occurrence.
pub const FIXTURE_TRANSITIONS: [&str; 7] = [
    "T1: (s:S4,t:S2): [id=1, act=(0) click, cp=[ty=android.widget.Button,idx=permission_allow_button,tx=Allow,dsc=], weight=0.5]",
    "T2: (s:S2,t:S6): [id=2, act=(0) click, cp=[ty=android.widget.ImageView,idx=media_thumbnail,tx=,dsc=Photo of a bridge], weight=0.25]",
    "T3: (s:S6,t:S2): [id=3, act=(2) back, cp=null, weight=0.25]",
    "T2: (s:S2,t:S6): [id=2, act=(0) click, cp=[ty=android.widget.ImageView,idx=media_thumbnail,tx=,dsc=Photo of a bridge], weight=0.25]",
    "T4: (s:S2,t:S7): [id=4, act=(0) click, cp=[ty=android.widget.ImageButton,idx=fab_upload,tx=,dsc=Upload], weight=1.0]",
    "T5: (s:S2,t:S1): [id=5, act=(1) long_click, cp=[ty=android.widget.TextView,idx=menu_settings,tx=Settings,dsc=]]",
    "T6: (s:S1,t:S5): [id=6, act=(3) swipe, cp=null, weight=0.1]",
];

pub const FIXTURE_SCREENS: &str = "\
S1: Settings
S2: Main Feed
S3: Login
S4: Permission Dialog
S5: Launcher
S6: Media Details
S7: Unknown Screen";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

pub fn commons_graph() -> String {
    fixture("commons_graph.txt")
}

// ============================================================================
// Synthetic graph builders
// ============================================================================

/// Deterministic 64-hex hash for a small number.
pub fn hex(n: u64) -> String {
    format!("{:064x}", n)
}

pub fn transition_line(hash: &str, source: &str, target: &str, payload: &str) -> String {
    format!("{}: (s: {}, t: {}): {}", hash, source, target, payload)
}

pub fn screen_line(hash: &str, name: &str) -> String {
    format!("{}, {}, com.example/.Activity, 0", hash, name)
}

pub fn graph_text(transitions: &[String], states: &[String]) -> String {
    let mut out = String::from("Transitions:\n");
    for line in transitions {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("States:\n");
    for line in states {
        out.push_str(line);
        out.push('\n');
    }
    out
}
