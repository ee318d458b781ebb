use bytes::Bytes;

pub type HttpRequest = http::Request<Bytes>;

pub type HttpResponse = http::Response<Bytes>;
