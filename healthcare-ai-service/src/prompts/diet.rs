use crate::models::DietRequest;

/// Build the one-day meal plan prompt. The reply is expected as plain Markdown.
pub fn build_diet_prompt(request: &DietRequest) -> String {
    format!(
        "You are a professional Nutritionist. Create a 1-day meal plan for a client \
         whose goal is to '{goal}' with a target of {calories} calories per day.\n\n\
         Requirements:\n\
         1. Provide exactly 3 meals: Breakfast, Lunch, Dinner.\n\
         2. Provide 1 Snack option.\n\
         3. For each meal, list the Name, approximate Calories, and Macronutrients (Protein, Carbs, Fat).\n\
         4. Keep the meals simple and healthy.\n\
         5. Format the output in clean Markdown (use bolding for Meal Names).\n\
         6. Do NOT include introductory text, just the plan.",
        goal = request.dietary_goal(),
        calories = request.target_calories(),
    )
}
