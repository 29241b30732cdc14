//! The literal content of the promo: what each scene says, its layout
//! constants and how long it stays on screen.

use serde::Serialize;

use crate::error::ReelResult;
use crate::{Color, Duration};

/// How long a scene is shown and how it fades in and out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneTiming {
    pub duration: Duration,
    pub fade_in: Duration,
    pub fade_out: Duration,
}

impl SceneTiming {
    pub fn seconds(duration: f64, fade_in: f64, fade_out: f64) -> Self {
        Self {
            duration: Duration::from_seconds(duration),
            fade_in: Duration::from_seconds(fade_in),
            fade_out: Duration::from_seconds(fade_out),
        }
    }
}

/// Opening hook: one big question and a muted subtitle.
#[derive(Debug, Clone, Serialize)]
pub struct HookScene {
    pub title: String,
    pub subtitle: Option<String>,
    pub title_size: f32,
    pub timing: SceneTiming,
}

/// Product name under a ringed logo disc, then the selling points.
#[derive(Debug, Clone, Serialize)]
pub struct LogoScene {
    pub name: String,
    pub tagline: String,
    pub features: Vec<String>,
    pub timing: SceneTiming,
}

/// One transcript row. `None` text color marks a blank spacer line.
#[derive(Debug, Clone, Serialize)]
pub struct TerminalLine {
    pub text: String,
    pub color: Option<Color>,
}

impl TerminalLine {
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            color: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty() || self.color.is_none()
    }
}

/// Mock terminal window with a scripted install session.
#[derive(Debug, Clone, Serialize)]
pub struct TerminalScene {
    pub background: Color,
    pub title_bar: Color,
    /// Close / minimize / zoom indicator colors, left to right.
    pub indicators: [Color; 3],
    pub lines: Vec<TerminalLine>,
    pub line_pitch: u32,
    pub timing: SceneTiming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    fn new(role: ChatRole, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }

    /// Number of text lines; the content is split on `\n` only.
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}

/// Bubble geometry for the chat transcript.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChatLayout {
    pub start_y: i32,
    pub line_height: u32,
    pub padding: u32,
    pub gap: u32,
    pub bubble_width: u32,
    pub side_margin: u32,
    pub corner_radius: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatScene {
    pub title: String,
    pub stats: String,
    pub header: Color,
    pub assistant_bubble: Color,
    pub messages: Vec<ChatMessage>,
    pub memory_note: String,
    pub layout: ChatLayout,
    pub timing: SceneTiming,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub value: u64,
    pub color: Color,
    pub cost: String,
}

/// Bar geometry for the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub bar_x: i32,
    pub bar_max_width: u32,
    pub bar_height: u32,
    pub start_y: i32,
    pub row_step: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartScene {
    pub title: String,
    pub rows: Vec<ChartRow>,
    pub max_value: u64,
    pub track: Color,
    pub track_outline: Color,
    pub layout: ChartLayout,
    pub timing: SceneTiming,
}

/// Closing call to action.
#[derive(Debug, Clone, Serialize)]
pub struct ClosingScene {
    pub badge: String,
    pub title: String,
    pub url: String,
    pub call_to_action: String,
    pub features: Vec<String>,
    pub timing: SceneTiming,
}

/// All six scenes, in playback order.
#[derive(Debug, Clone, Serialize)]
pub struct Script {
    pub hook: HookScene,
    pub logo: LogoScene,
    pub terminal: TerminalScene,
    pub chat: ChatScene,
    pub chart: ChartScene,
    pub closing: ClosingScene,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Script {
    /// The shipped promo. Fails only if one of the literal color codes is malformed.
    pub fn canonical() -> ReelResult<Self> {
        let standard = SceneTiming::seconds(0.0, 0.5, 0.5);
        let timed = |seconds: f64| SceneTiming {
            duration: Duration::from_seconds(seconds),
            ..standard
        };

        let prompt = Color::from_hex("#6CC644")?;
        let command = Color::from_hex("#F8FAFC")?;
        let line = |text: &str, color: Color| TerminalLine {
            text: text.to_string(),
            color: Some(color),
        };

        Ok(Self {
            hook: HookScene {
                title: "你的 AI 助手太烧钱？".into(),
                subtitle: Some("每个月几百刀的 API 账单".into()),
                title_size: 80.0,
                timing: timed(3.0),
            },
            logo: LogoScene {
                name: "Synapse AI".into(),
                tagline: "轻量级个人 AI 助手".into(),
                features: strings(&[
                    "✓ Token 消耗降低 60%",
                    "✓ 完全开源免费",
                    "✓ 微信机器人集成",
                    "✓ 本地优先，隐私保护",
                ]),
                timing: timed(5.0),
            },
            terminal: TerminalScene {
                background: Color::from_hex("#1E1E1E")?,
                title_bar: Color::from_hex("#323232")?,
                indicators: [
                    Color::from_hex("#FF5F56")?,
                    Color::from_hex("#FFBD2E")?,
                    Color::from_hex("#27C93F")?,
                ],
                lines: vec![
                    line("$ ", prompt),
                    line(
                        "git clone https://github.com/Ricardo-M-L/synapse-ai.git",
                        command,
                    ),
                    TerminalLine::blank(),
                    line("$ ", prompt),
                    line("cd synapse-ai && npm install", command),
                    TerminalLine::blank(),
                    line("$ ", prompt),
                    line("npm run build", command),
                    line("✓ Built successfully in 2.34s", Color::from_hex("#10B981")?),
                    TerminalLine::blank(),
                    line("$ ", prompt),
                    line("npm run cli -- chat", command),
                    TerminalLine::blank(),
                    line("🧠 Synapse AI 已启动！", Color::from_hex("#3B82F6")?),
                    line("提示: 输入 /help 查看可用命令", Color::from_hex("#94A3B8")?),
                    line("synapse> ", Color::from_hex("#F59E0B")?),
                ],
                line_pitch: 40,
                timing: timed(6.0),
            },
            chat: ChatScene {
                title: "Synapse AI Chat".into(),
                stats: "Token: 245 | $0.007".into(),
                header: Color::from_hex("#1E293B")?,
                assistant_bubble: Color::from_hex("#334155")?,
                messages: vec![
                    ChatMessage::new(ChatRole::User, "帮我写一个 Python 脚本，批量重命名文件"),
                    ChatMessage::new(
                        ChatRole::Assistant,
                        "好的，这是一个使用 os 模块的脚本：\n\nimport os\ndef batch_rename(folder):\n    for f in os.listdir(folder):\n        ...",
                    ),
                    ChatMessage::new(ChatRole::User, "昨天说的用户系统方案还有吗？"),
                    ChatMessage::new(
                        ChatRole::Assistant,
                        "当然记得！昨天的用户认证方案：\n\n1. JWT Token + Refresh\n2. Redis 存储会话\n3. 支持多端登录\n\n需要展开哪部分？",
                    ),
                ],
                memory_note: "使用了持久化记忆 | .synapse/memories/project-arch.md".into(),
                layout: ChatLayout {
                    start_y: 120,
                    line_height: 30,
                    padding: 15,
                    gap: 25,
                    bubble_width: 700,
                    side_margin: 80,
                    corner_radius: 12,
                },
                timing: timed(8.0),
            },
            chart: ChartScene {
                title: "同样的代码审查任务 - Token 消耗对比".into(),
                rows: vec![
                    ChartRow {
                        label: "Claude Code".into(),
                        value: 15_000,
                        color: Color::from_hex("#EF4444")?,
                        cost: "$0.45".into(),
                    },
                    ChartRow {
                        label: "Cursor".into(),
                        value: 10_000,
                        color: Color::from_hex("#F59E0B")?,
                        cost: "$0.30".into(),
                    },
                    ChartRow {
                        label: "Synapse AI".into(),
                        value: 5_000,
                        color: Color::from_hex("#10B981")?,
                        cost: "$0.15 节省60%".into(),
                    },
                ],
                max_value: 15_000,
                track: Color::from_hex("#1E293B")?,
                track_outline: Color::from_hex("#334155")?,
                layout: ChartLayout {
                    bar_x: 400,
                    bar_max_width: 800,
                    bar_height: 80,
                    start_y: 250,
                    row_step: 120,
                },
                timing: timed(6.0),
            },
            closing: ClosingScene {
                badge: "★".into(),
                title: "Synapse AI".into(),
                url: "github.com/Ricardo-M-L/synapse-ai".into(),
                call_to_action: "点个 Star 支持开源！".into(),
                features: strings(&[
                    "轻量级 - 20MB 体积",
                    "省钱 - Token 减少 60%",
                    "安全 - 本地优先",
                    "微信 - 机器人集成",
                ]),
                timing: SceneTiming::seconds(5.0, 0.5, 1.5),
            },
        })
    }

    /// Scene timings in playback order.
    pub fn timings(&self) -> [SceneTiming; 6] {
        [
            self.hook.timing,
            self.logo.timing,
            self.terminal.timing,
            self.chat.timing,
            self.chart.timing,
            self.closing.timing,
        ]
    }

    /// Sum of all scene durations.
    pub fn total_duration(&self) -> Duration {
        self.timings().iter().map(|t| t.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_script_builds() {
        let script = Script::canonical().unwrap();
        assert_eq!(script.logo.features.len(), 4);
        assert_eq!(script.chart.rows.len(), 3);
        assert_eq!(script.chat.messages.len(), 4);
    }

    #[test]
    fn test_canonical_durations() {
        let script = Script::canonical().unwrap();
        let seconds: Vec<f64> = script
            .timings()
            .iter()
            .map(|t| t.duration.as_seconds())
            .collect();
        assert_eq!(seconds, vec![3.0, 5.0, 6.0, 8.0, 6.0, 5.0]);
        assert_eq!(script.total_duration().as_seconds(), 33.0);
        assert_eq!(script.closing.timing.fade_out.as_seconds(), 1.5);
    }

    #[test]
    fn test_chat_line_counts() {
        let script = Script::canonical().unwrap();
        let counts: Vec<usize> = script.chat.messages.iter().map(|m| m.line_count()).collect();
        assert_eq!(counts, vec![1, 6, 1, 7]);
    }

    #[test]
    fn test_terminal_blank_lines() {
        let script = Script::canonical().unwrap();
        let blanks = script.terminal.lines.iter().filter(|l| l.is_blank()).count();
        assert_eq!(blanks, 4);
        assert_eq!(script.terminal.lines.len(), 16);
    }

    #[test]
    fn test_chart_max_matches_largest_row() {
        let script = Script::canonical().unwrap();
        let largest = script.chart.rows.iter().map(|r| r.value).max().unwrap();
        assert_eq!(largest, script.chart.max_value);
    }
}
