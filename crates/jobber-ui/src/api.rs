use async_trait::async_trait;
use gloo::net::http::{
  Request,
  Response
};
use jobber_core::{
  Endpoints,
  GatewayError,
  ImageSource,
  MemoryGateway,
  MemoryImage,
  Task,
  TaskFields,
  TaskGateway,
  TaskId
};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::FormData;

/// A file picked from an `<input type="file">`.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserImage {
  file: web_sys::File
}

impl BrowserImage {
  pub fn new(file: web_sys::File) -> Self {
    Self { file }
  }

  pub fn file(&self) -> &web_sys::File {
    &self.file
  }
}

impl ImageSource for BrowserImage {
  fn name(&self) -> String {
    self.file.name()
  }

  fn size_bytes(&self) -> u64 {
    self.file.size() as u64
  }

  fn mime_type(&self) -> String {
    self.file.type_()
  }
}

/// Talks to the task REST API with `fetch`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
  endpoints: Endpoints
}

impl HttpGateway {
  pub fn new(endpoints: Endpoints) -> Self {
    Self { endpoints }
  }

  fn multipart(
    fields: &TaskFields,
    image: Option<&BrowserImage>
  ) -> Result<FormData, GatewayError> {
    let form =
      FormData::new().map_err(js_error)?;
    for (key, value) in
      fields.multipart_fields()
    {
      form
        .append_with_str(key, &value)
        .map_err(js_error)?;
    }
    if let Some(image) = image {
      form
        .append_with_blob_and_filename(
          "image",
          image.file(),
          &image.file().name()
        )
        .map_err(js_error)?;
    }
    Ok(form)
  }
}

fn js_error(value: JsValue) -> GatewayError {
  GatewayError::Network(format!(
    "{value:?}"
  ))
}

fn network(
  error: gloo::net::Error
) -> GatewayError {
  GatewayError::Network(error.to_string())
}

async fn error_body(
  response: &Response
) -> String {
  let text =
    response.text().await.unwrap_or_default();
  match serde_json::from_str::<
    serde_json::Value
  >(&text)
  {
    | Ok(value) => value.to_string(),
    | Err(_) => text
  }
}

async fn decode<T: DeserializeOwned>(
  response: Response,
  id: Option<TaskId>
) -> Result<T, GatewayError> {
  if !response.ok() {
    let body = error_body(&response).await;
    return Err(GatewayError::from_status(
      response.status(),
      body,
      id
    ));
  }
  response.json::<T>().await.map_err(
    |error| {
      GatewayError::Decode(
        error.to_string()
      )
    }
  )
}

#[async_trait(?Send)]
impl TaskGateway for HttpGateway {
  type Upload = BrowserImage;

  async fn list_tasks(
    &self
  ) -> Result<Vec<Task>, GatewayError> {
    let response =
      Request::get(&self.endpoints.tasks())
        .send()
        .await
        .map_err(network)?;
    decode(response, None).await
  }

  async fn get_task(
    &self,
    id: TaskId
  ) -> Result<Task, GatewayError> {
    let response =
      Request::get(&self.endpoints.task(id))
        .send()
        .await
        .map_err(network)?;
    decode(response, Some(id)).await
  }

  async fn create_task(
    &self,
    fields: &TaskFields,
    image: Option<&BrowserImage>
  ) -> Result<Task, GatewayError> {
    let form = Self::multipart(fields, image)?;
    let response =
      Request::post(&self.endpoints.tasks())
        .body(form)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    decode(response, None).await
  }

  async fn update_task(
    &self,
    id: TaskId,
    fields: &TaskFields,
    image: Option<&BrowserImage>
  ) -> Result<Task, GatewayError> {
    let form = Self::multipart(fields, image)?;
    let response =
      Request::put(&self.endpoints.task(id))
        .body(form)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    decode(response, Some(id)).await
  }

  async fn delete_task(
    &self,
    id: TaskId
  ) -> Result<(), GatewayError> {
    let response = Request::delete(
      &self.endpoints.task(id)
    )
    .send()
    .await
    .map_err(network)?;
    if response.ok() {
      Ok(())
    } else {
      let body = error_body(&response).await;
      Err(GatewayError::from_status(
        response.status(),
        body,
        Some(id)
      ))
    }
  }
}

/// The gateway selected by config: the REST API, or an in-memory store
/// for offline previews.
#[derive(Debug)]
pub enum AppGateway {
  Http(HttpGateway),
  Memory(MemoryGateway)
}

fn to_memory(
  image: Option<&BrowserImage>
) -> Option<MemoryImage> {
  image.map(|img| {
    MemoryImage::new(
      &img.name(),
      &img.mime_type(),
      img.size_bytes()
    )
  })
}

#[async_trait(?Send)]
impl TaskGateway for AppGateway {
  type Upload = BrowserImage;

  async fn list_tasks(
    &self
  ) -> Result<Vec<Task>, GatewayError> {
    match self {
      | AppGateway::Http(http) => {
        http.list_tasks().await
      }
      | AppGateway::Memory(memory) => {
        memory.list_tasks().await
      }
    }
  }

  async fn get_task(
    &self,
    id: TaskId
  ) -> Result<Task, GatewayError> {
    match self {
      | AppGateway::Http(http) => {
        http.get_task(id).await
      }
      | AppGateway::Memory(memory) => {
        memory.get_task(id).await
      }
    }
  }

  async fn create_task(
    &self,
    fields: &TaskFields,
    image: Option<&BrowserImage>
  ) -> Result<Task, GatewayError> {
    match self {
      | AppGateway::Http(http) => {
        http.create_task(fields, image).await
      }
      | AppGateway::Memory(memory) => {
        memory
          .create_task(
            fields,
            to_memory(image).as_ref()
          )
          .await
      }
    }
  }

  async fn update_task(
    &self,
    id: TaskId,
    fields: &TaskFields,
    image: Option<&BrowserImage>
  ) -> Result<Task, GatewayError> {
    match self {
      | AppGateway::Http(http) => {
        http
          .update_task(id, fields, image)
          .await
      }
      | AppGateway::Memory(memory) => {
        memory
          .update_task(
            id,
            fields,
            to_memory(image).as_ref()
          )
          .await
      }
    }
  }

  async fn delete_task(
    &self,
    id: TaskId
  ) -> Result<(), GatewayError> {
    match self {
      | AppGateway::Http(http) => {
        http.delete_task(id).await
      }
      | AppGateway::Memory(memory) => {
        memory.delete_task(id).await
      }
    }
  }
}
