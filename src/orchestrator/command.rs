//! 交互命令解析
//!
//! 一行输入对应一条命令；课程序号和页码都按用户看到的 1 起始计数

use std::str::FromStr;

/// 命令帮助文本
pub const HELP_TEXT: &str = "\
可用命令:
  open <路径|URL>      加载 PDF（本地文件或 http/https 地址）
  proxy on|off         远程加载时是否经由代理
  toggle <页码>        选择/取消选择页，如 1,3-5
  create               用已选页创建课程
  rename <序号> <名称> 重命名课程
  delete <序号>        删除课程，释放其页面
  list                 查看页面与课程
  json                 以 JSON 输出课程列表
  extract              导出全部课程为 ZIP
  reset                清空会话
  help                 显示本帮助
  quit                 退出";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(String),
    Proxy(bool),
    /// 未解析的页码表达式，需结合文档页数校验
    Toggle(String),
    Create,
    /// 课程序号为 0 起始
    Rename { index: usize, name: String },
    Delete(usize),
    List,
    Json,
    Extract,
    Reset,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "open" => Command::Open(required(rest, "open <路径|URL>")?.to_string()),
            "proxy" => match rest.to_ascii_lowercase().as_str() {
                "on" => Command::Proxy(true),
                "off" => Command::Proxy(false),
                _ => return Err("用法: proxy on|off".to_string()),
            },
            "toggle" => Command::Toggle(required(rest, "toggle <页码>")?.to_string()),
            "create" => Command::Create,
            "rename" => {
                let (index, name) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "用法: rename <序号> <名称>".to_string())?;
                Command::Rename {
                    index: parse_index(index)?,
                    name: name.trim().to_string(),
                }
            }
            "delete" => Command::Delete(parse_index(required(rest, "delete <序号>")?)?),
            "list" | "ls" => Command::List,
            "json" => Command::Json,
            "extract" => Command::Extract,
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err("请输入命令，help 查看帮助".to_string()),
            other => return Err(format!("未知命令: {}，help 查看帮助", other)),
        };

        Ok(command)
    }
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("用法: {}", usage))
    } else {
        Ok(rest)
    }
}

/// 1 起始的课程序号 → 0 起始索引
fn parse_index(text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("无效的课程序号: '{}'", text.trim())),
    }
}
