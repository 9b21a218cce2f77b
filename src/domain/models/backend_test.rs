use super::BackendFailure;
use super::Reply;

#[test]
fn it_maps_data() {
    let reply = Reply::Data(vec![1, 2, 3]).map(|e| return e.len());
    assert_eq!(reply, Reply::Data(3));
}

#[test]
fn it_keeps_auth_required_when_mapping() {
    let reply: Reply<Vec<i32>> = Reply::AuthRequired {
        location: "http://localhost/login".to_string(),
    };

    assert_eq!(
        reply.map(|e| return e.len()),
        Reply::AuthRequired {
            location: "http://localhost/login".to_string()
        }
    );
}

#[test]
fn it_converts_data_into_ok() {
    let res = Reply::Data("X is Y".to_string()).into_result();
    assert_eq!(res, Ok("X is Y".to_string()));
}

#[test]
fn it_converts_auth_required_into_backend_failure() {
    let reply: Reply<String> = Reply::AuthRequired {
        location: "http://localhost/login".to_string(),
    };

    insta::assert_snapshot!(reply.into_result().unwrap_err().to_string(), @"Authentication required, sign in at http://localhost/login");
}

#[test]
fn it_keeps_failures() {
    let reply: Reply<String> = Reply::Failed(BackendFailure::Network("connection refused".to_string()));
    let err = reply.into_result().unwrap_err();

    assert_eq!(err, BackendFailure::Network("connection refused".to_string()));
    assert_eq!(err.to_string(), "Network error: connection refused");
}
