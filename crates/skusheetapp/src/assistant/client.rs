use super::json::parse_records;
use super::{ExtractedProduct, OptimizedSpec, ProductAssistant, RenamedTitle};
use crate::config::SheetConfig;
use crate::error::{Result, SheetError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_EXTRACT_PROMPT: &str = "你是电商商品资料整理助手。从用户提供的文本或HTML中提取所有商品及其SKU，\
只输出JSON数组，不要任何解释。每个元素代表一个SKU，字段：\
productName(商品名称), price(价格), specs(SKU规格，如\"红色/XL\"), skuCode(SKU编码，没有则留空), \
productCode(商品编码，没有则留空), stock(库存), description(商品描述), detailHtml(商品详情HTML), \
images(商品主图URL数组), skuImage(SKU图片URL), category(商品分类)。\
同一商品的多个SKU必须使用完全相同的productName。";

const RENAME_PROMPT: &str = "你是电商标题优化助手。为每个商品名称生成一个更适合平台搜索的标题，\
保留品牌和核心卖点，不超过60个字。只输出JSON数组，元素格式：{\"original\":原名称,\"new_name\":新标题}。";

const OPTIMIZE_PROMPT: &str = "你是电商SKU规格整理助手。把每个规格描述改写成简洁统一的格式，\
例如\"颜色:红色;尺码:XL\"改为\"红色/XL\"。只输出JSON数组，元素格式：{\"original\":原规格,\"optimized\":新规格}。";

/// Chat-completions client for any OpenAI-compatible endpoint.
pub struct LlmAssistant {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
    extract_prompt: String,
}

impl LlmAssistant {
    pub fn from_config(config: &SheetConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key().map(str::to_string),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            extract_prompt: config.extract_prompt().to_string(),
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            SheetError::InvalidInput(
                "No API key configured (set SKUSHEET_API_KEY or api_key in skusheet.toml)".to_string(),
            )
        })
    }

    fn endpoint(&self) -> String {
        if self.base_url.ends_with('/') {
            format!("{}chat/completions", self.base_url)
        } else {
            format!("{}/chat/completions", self.base_url)
        }
    }

    /// One system + user exchange; returns the assistant message text.
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let api_key = self.api_key()?;
        if system.trim().is_empty() {
            return Err(SheetError::InvalidInput("Prompt is empty".to_string()));
        }

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        debug!(model = %self.model, chars = user.chars().count(), "assistant request");
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SheetError::api(format!("API error ({})", status), text));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| SheetError::api(format!("Failed to parse JSON: {}", e), text.clone()))?;
        json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SheetError::api("Invalid response format", text))
    }
}

#[async_trait]
impl ProductAssistant for LlmAssistant {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedProduct>> {
        let content = self.complete(&self.extract_prompt, text).await?;
        let records: Vec<ExtractedProduct> = parse_records(&content)?;
        info!(records = records.len(), "extraction finished");
        Ok(records)
    }

    async fn rename(&self, names: &[String]) -> Result<Vec<RenamedTitle>> {
        let content = self.complete(RENAME_PROMPT, &json!(names).to_string()).await?;
        parse_records(&content)
    }

    async fn optimize_specs(&self, specs: &[String]) -> Result<Vec<OptimizedSpec>> {
        let content = self.complete(OPTIMIZE_PROMPT, &json!(specs).to_string()).await?;
        parse_records(&content)
    }
}
