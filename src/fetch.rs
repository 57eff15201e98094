//! Execute a logical request and turn the json into [ApiResponse]s.

use crate::{
    definitions::{ApiResponse, PageEntry, ParseBody},
    errors::{Result, WikiError},
    executor::{ApiRequest, Facet, Operation, RequestExecutor},
};

/// One request, one response.
pub(crate) async fn fetch<E: RequestExecutor>(
    executor: &E,
    request: &ApiRequest,
) -> Result<ApiResponse> {
    log::debug!("Executing {:?}", request.operation);
    let value = executor.execute(request).await?;
    Ok(serde_json::from_value::<ApiResponse>(value)?)
}

/// Every page entry for `operation`, following `continue` tokens until the API
/// stops handing them out.
pub(crate) async fn fetch_pages<E: RequestExecutor>(
    executor: &E,
    operation: Operation,
) -> Result<Vec<PageEntry>> {
    let mut request = ApiRequest::new(operation);
    let mut pages = vec![];
    loop {
        let response = fetch(executor, &request).await?;
        let continuation = response.continuation_params();
        pages.extend(response.query.pages);

        let Some(token) = continuation else {
            break;
        };
        if token == request.continuation {
            return Err(WikiError::malformed(format!(
                "continuation did not advance for {:?}",
                request.operation
            )));
        }
        log::debug!("Continuing {:?} with {:?}", request.operation, token);
        request = request.continued(token);
    }
    Ok(pages)
}

/// The `parse` body of an `action=parse` facet.
pub(crate) async fn fetch_parse<E: RequestExecutor>(
    executor: &E,
    facet: Facet,
    page_id: u64,
) -> Result<Option<ParseBody>> {
    let request = ApiRequest::new(Operation::Fetch(facet, page_id));
    Ok(fetch(executor, &request).await?.parse)
}
