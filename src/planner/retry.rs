//! 通用的指数退避重试

use std::future::Future;
use std::time::Duration;

/// 以指数退避重试异步操作
///
/// 第n次尝试失败且还有剩余次数时，先等待 base_delay * 2^(n-1) 再重试；
/// 最后一次失败直接返回错误，不再等待。错误类型原样透出，由调用方决定
/// 重试耗尽后是降级还是传播。
pub async fn with_backoff<T, E, F, Fut>(
    label: &str,
    max_attempts: u32,
    base_delay: Duration,
    operation: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::warn!(
                    "{}尝试 {} / {} 失败: {}",
                    label,
                    attempt,
                    max_attempts,
                    err
                );
                if attempt >= max_attempts {
                    return Err(err);
                }
                tokio::time::sleep(base_delay * 2u32.pow(attempt - 1)).await;
            }
        }
    }
}
