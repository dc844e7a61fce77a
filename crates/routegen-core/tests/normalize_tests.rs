use routegen_core::transform::name_normalizer::{normalize_name, route_to_name};
use routegen_core::transform::path_template::parse_path_template;

#[test]
fn test_camel_case_input() {
    let n = normalize_name("createChatCompletion");
    assert_eq!(n.pascal_case, "CreateChatCompletion");
    assert_eq!(n.camel_case, "createChatCompletion");
    assert_eq!(n.snake_case, "create_chat_completion");
    assert_eq!(n.screaming_snake, "CREATE_CHAT_COMPLETION");
}

#[test]
fn test_kebab_case_input() {
    let n = normalize_name("pet-store-api");
    assert_eq!(n.pascal_case, "PetStoreApi");
    assert_eq!(n.camel_case, "petStoreApi");
}

#[test]
fn test_path_like_input() {
    let n = normalize_name("/pets/{petId}");
    assert_eq!(n.pascal_case, "PetsPetId");
}

#[test]
fn test_route_based_names() {
    assert_eq!(route_to_name("GET", "/users"), "listUsers");
    assert_eq!(route_to_name("GET", "/users/{userId}"), "getUser");
    assert_eq!(route_to_name("GET", "/users/:userId"), "getUser");
    assert_eq!(route_to_name("DELETE", "/users/{userId}"), "deleteUser");
    assert_eq!(route_to_name("POST", "/pets/{petId}/photo"), "createPetsPhoto");
}

#[test]
fn test_brace_and_colon_tokens_normalize_alike() {
    for path in ["/items/{id}", "/items/:id", "/items/:id:"] {
        let template = parse_path_template(path);
        assert_eq!(template.route, "/items/${id}", "{path}");
        assert_eq!(template.path_params.len(), 1);
        assert_eq!(template.path_params[0].name, "id");
    }
}

#[test]
fn test_hyphenated_tokens_become_camel_case() {
    let template = parse_path_template("/orgs/{org-id}/members/{member_id}");
    let names: Vec<&str> = template.path_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["orgId", "memberId"]);
    assert_eq!(template.route, "/orgs/${orgId}/members/${memberId}");
}
