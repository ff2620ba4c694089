#[cfg(test)]
mod tests {
    use crate::utils::clean_json_response;

    #[test]
    fn test_clean_json_response_strips_fences() {
        let raw = "```json\n{\"景区\": \"故宫\"}\n```";
        assert_eq!(clean_json_response(raw), "{\"景区\": \"故宫\"}");
    }

    #[test]
    fn test_clean_json_response_plain_passthrough() {
        let raw = "  {\"name\": \"北京\", \"days\": 3}  ";
        assert_eq!(clean_json_response(raw), "{\"name\": \"北京\", \"days\": 3}");
    }

    #[test]
    fn test_clean_json_response_bare_fences() {
        let raw = "```\n[1, 2, 3]\n```";
        assert_eq!(clean_json_response(raw), "[1, 2, 3]");
    }

    #[test]
    fn test_clean_json_response_keeps_surrounding_prose() {
        // Prose outside the fences is kept; strict parsing rejects it later
        let raw = "好的，结果如下：```json\n[]\n```";
        assert_eq!(clean_json_response(raw), "好的，结果如下：\n[]");
    }
}
