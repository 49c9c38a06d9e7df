/// 解析页码列表，如 "1,3-5"
///
/// 输入为用户看到的 1 起始页码，输出为 0 起始、升序去重的页索引。
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (start, end) = match part.split_once('-') {
            Some((start, end)) => (parse_page(start, page_count)?, parse_page(end, page_count)?),
            None => {
                let page = parse_page(part, page_count)?;
                (page, page)
            }
        };

        if start > end {
            return Err(format!("页码范围 {}-{} 起始大于结束", start, end));
        }

        pages.extend((start..=end).map(|p| p - 1));
    }

    if pages.is_empty() {
        return Err("未指定任何页码".to_string());
    }

    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

fn parse_page(text: &str, page_count: usize) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("无效的页码: '{}'", text))?;
    if page == 0 {
        return Err("页码从 1 开始".to_string());
    }
    if page > page_count {
        return Err(format!("第 {} 页超出文档页数 ({})", page, page_count));
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_list() {
        assert_eq!(parse_page_range("3", 5).unwrap(), vec![2]);
        assert_eq!(parse_page_range("1,3,5", 5).unwrap(), vec![0, 2, 4]);
    }

    #[test]
    fn test_ranges_and_whitespace() {
        assert_eq!(
            parse_page_range(" 1 , 3 - 5 ", 5).unwrap(),
            vec![0, 2, 3, 4]
        );
        assert_eq!(
            parse_page_range("1-3,7,10-12", 12).unwrap(),
            vec![0, 1, 2, 6, 9, 10, 11]
        );
    }

    #[test]
    fn test_duplicates_removed() {
        assert_eq!(parse_page_range("2,1-2,2", 5).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_errors() {
        assert!(parse_page_range("0", 5).unwrap_err().contains("从 1 开始"));
        assert!(parse_page_range("6", 5).unwrap_err().contains("超出"));
        assert!(parse_page_range("a", 5).unwrap_err().contains("无效"));
        assert!(parse_page_range("4-2", 5).unwrap_err().contains("起始大于结束"));
        assert!(parse_page_range(" , ", 5).is_err());
    }
}
